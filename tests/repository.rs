use beer_inventory::domain::beer::{NewBeer, UpdateBeer};
use beer_inventory::domain::beer_order::NewBeerOrder;
use beer_inventory::domain::category::NewCategory;
use beer_inventory::domain::customer::NewCustomer;
use beer_inventory::domain::types::{
    BeerId, BeerName, BeerPrice, BeerStyle, CategoryDescription, CustomerEmail, CustomerName,
    CustomerRef, QuantityOnHand, RecordVersion, Upc,
};
use beer_inventory::pagination::build_page_request;
use beer_inventory::repository::{
    BeerListQuery, BeerOrderReader, BeerOrderWriter, BeerReader, BeerWriter, CategoryReader,
    CategoryWriter, CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository,
    MemoryRepository, RepositoryError,
};
use diesel::prelude::*;

mod common;

fn new_beer(name: &str, style: BeerStyle, upc: &str) -> NewBeer {
    NewBeer {
        name: BeerName::new(name).expect("valid beer name"),
        style,
        upc: Upc::new(upc).expect("valid upc"),
        quantity_on_hand: Some(QuantityOnHand::new(12).expect("valid quantity")),
        price: BeerPrice::parse("12.99").expect("valid price"),
    }
}

fn seed(repo: &DieselRepository) {
    repo.create_beers(&[
        new_beer("Galaxy Cat", BeerStyle::PaleAle, "123456"),
        new_beer("Crank", BeerStyle::PaleAle, "12332435"),
        new_beer("Sunshine City", BeerStyle::Ipa, "123456"),
        new_beer("Hazy IPA Dream", BeerStyle::Ipa, "777"),
        new_beer("Dark Side", BeerStyle::Stout, "888"),
    ])
    .expect("should insert beers");
}

#[test]
fn beer_crud_roundtrip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_beer(&new_beer("New Beer", BeerStyle::PaleAle, "123456"))
        .expect("should create beer");
    assert_eq!(created.version, RecordVersion::INITIAL);
    assert_eq!(created.price.to_string(), "12.99");

    let fetched = repo
        .get_beer_by_id(created.id)
        .expect("should query beer")
        .expect("beer should exist");
    assert_eq!(fetched, created);

    let mut update: UpdateBeer = new_beer("Renamed", BeerStyle::Lager, "42").into();
    update.quantity_on_hand = None;
    let updated = repo
        .update_beer(created.id, &update)
        .expect("should update beer")
        .expect("beer should exist");
    assert_eq!(updated.name.as_str(), "Renamed");
    assert_eq!(updated.style, BeerStyle::Lager);
    assert_eq!(updated.quantity_on_hand, None);
    assert_eq!(updated.version, created.version.next());
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    assert_eq!(repo.delete_beer(created.id).expect("should delete"), 1);
    assert_eq!(repo.delete_beer(created.id).expect("should delete"), 0);
    assert!(repo.get_beer_by_id(created.id).expect("should query").is_none());
}

#[test]
fn update_of_unknown_beer_returns_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let update: UpdateBeer = new_beer("Ghost", BeerStyle::Ale, "1").into();
    let result = repo
        .update_beer(BeerId::generate(), &update)
        .expect("should run update");
    assert!(result.is_none());
}

#[test]
fn name_filter_is_case_insensitive_substring() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);

    let (total, beers) = repo
        .list_beers(BeerListQuery::default().name("ipa"))
        .expect("should list beers");
    assert_eq!(total, 1);
    assert_eq!(beers[0].name.as_str(), "Hazy IPA Dream");
}

fn names_matching<R: BeerReader>(repo: &R, term: &str) -> Vec<String> {
    let (_, beers) = repo
        .list_beers(BeerListQuery::default().name(term))
        .expect("should list beers");
    beers.into_iter().map(|b| b.name.as_str().to_string()).collect()
}

fn check_name_search_is_literal_and_unicode_aware<R: BeerReader + BeerWriter>(repo: &R) {
    repo.create_beers(&[
        new_beer("Crank", BeerStyle::PaleAle, "1"),
        new_beer("Ölbier", BeerStyle::Lager, "2"),
        new_beer("100% Hops", BeerStyle::Ipa, "3"),
    ])
    .expect("should insert beers");

    assert!(names_matching(repo, "_").is_empty());
    assert_eq!(names_matching(repo, "%"), vec!["100% Hops"]);
    assert_eq!(names_matching(repo, "öl"), vec!["Ölbier"]);
    assert_eq!(names_matching(repo, "ÖLB"), vec!["Ölbier"]);
    assert_eq!(names_matching(repo, "CRANK"), vec!["Crank"]);

    let (_, crank) = repo
        .list_beers(BeerListQuery::default().name("crank"))
        .expect("should list beers");
    let update: UpdateBeer = new_beer("Äpfel Ale", BeerStyle::Ale, "1").into();
    repo.update_beer(crank[0].id, &update)
        .expect("should update beer")
        .expect("beer should exist");

    assert!(names_matching(repo, "crank").is_empty());
    assert_eq!(names_matching(repo, "äpfel"), vec!["Äpfel Ale"]);
}

#[test]
fn name_search_is_literal_and_unicode_aware_in_sqlite() {
    let test_db = common::TestDb::new();
    check_name_search_is_literal_and_unicode_aware(&DieselRepository::new(test_db.pool()));
}

#[test]
fn name_search_is_literal_and_unicode_aware_in_memory() {
    check_name_search_is_literal_and_unicode_aware(&MemoryRepository::new());
}

#[test]
fn page_far_past_the_data_is_empty() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);

    for page_number in [10_000_000_000_000_000, i64::MAX] {
        let (total, beers) = repo
            .list_beers(
                BeerListQuery::default().paginate(build_page_request(Some(page_number), Some(1000))),
            )
            .expect("should list beers");
        assert_eq!(total, 5);
        assert!(beers.is_empty(), "page {page_number}");
    }
}

#[test]
fn style_and_name_filters_combine() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);

    let (total, _) = repo
        .list_beers(BeerListQuery::default().style(BeerStyle::Ipa))
        .expect("should list beers");
    assert_eq!(total, 2);

    let (total, beers) = repo
        .list_beers(BeerListQuery::default().name("a").style(BeerStyle::PaleAle))
        .expect("should list beers");
    assert_eq!(total, 2);
    let names: Vec<&str> = beers.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Crank", "Galaxy Cat"]);
}

#[test]
fn pagination_reports_unpaged_total() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);

    let (total, first) = repo
        .list_beers(BeerListQuery::default().paginate(build_page_request(Some(1), Some(2))))
        .expect("should list beers");
    let (_, second) = repo
        .list_beers(BeerListQuery::default().paginate(build_page_request(Some(2), Some(2))))
        .expect("should list beers");

    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(first[0].name.as_str(), "Crank");
    assert_eq!(second[0].name.as_str(), "Galaxy Cat");
}

#[test]
fn overlong_upc_violates_table_constraint() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("should acquire connection");

    use beer_inventory::schema::beers;
    let result = diesel::insert_into(beers::table)
        .values((
            beers::id.eq(BeerId::generate().to_string()),
            beers::name.eq("Too Long"),
            beers::style.eq("LAGER"),
            beers::upc.eq("12345678901"),
            beers::price.eq("1.00"),
        ))
        .execute(&mut conn)
        .map_err(RepositoryError::from);

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[test]
fn category_links_are_symmetric() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let beer = repo
        .create_beer(&new_beer("Crank", BeerStyle::PaleAle, "12332435"))
        .expect("should create beer");
    let category = repo
        .create_category(&NewCategory {
            description: CategoryDescription::new("Ales").expect("valid description"),
        })
        .expect("should create category");

    assert_eq!(
        repo.add_beer_category(beer.id, category.id)
            .expect("should link"),
        1
    );
    assert_eq!(
        repo.add_beer_category(beer.id, category.id)
            .expect("should link"),
        0
    );

    let linked_beer = repo
        .get_beer_by_id(beer.id)
        .expect("should query")
        .expect("beer exists");
    let linked_category = repo
        .get_category_by_id(category.id)
        .expect("should query")
        .expect("category exists");
    assert!(linked_beer.categories.contains(&category.id));
    assert!(linked_category.beers.contains(&beer.id));
    assert_eq!(linked_beer.version, beer.version.next());
    assert_eq!(linked_category.version, category.version.next());

    assert_eq!(
        repo.remove_beer_category(beer.id, category.id)
            .expect("should unlink"),
        1
    );
    let categories = repo.list_categories().expect("should list");
    assert!(categories[0].beers.is_empty());
}

#[test]
fn linking_unknown_beer_is_not_found() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&NewCategory {
            description: CategoryDescription::new("Ales").expect("valid description"),
        })
        .expect("should create category");

    let result = repo.add_beer_category(BeerId::generate(), category.id);
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn deleting_beer_drops_its_links() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let beer = repo
        .create_beer(&new_beer("Crank", BeerStyle::PaleAle, "12332435"))
        .expect("should create beer");
    let category = repo
        .create_category(&NewCategory {
            description: CategoryDescription::new("Ales").expect("valid description"),
        })
        .expect("should create category");
    repo.add_beer_category(beer.id, category.id)
        .expect("should link");

    repo.delete_beer(beer.id).expect("should delete");
    let category = repo
        .get_category_by_id(category.id)
        .expect("should query")
        .expect("category exists");
    assert!(category.beers.is_empty());
}

#[test]
fn customers_and_orders() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let customer = repo
        .create_customer(&NewCustomer {
            name: CustomerName::new("John Spring").expect("valid name"),
            email: Some(CustomerEmail::new("john@example.com").expect("valid email")),
        })
        .expect("should create customer");
    repo.create_customer(&NewCustomer {
        name: CustomerName::new("Eva Blue").expect("valid name"),
        email: None,
    })
    .expect("should create customer");

    let (total, customers) = repo
        .list_customers(CustomerListQuery::default().paginate(build_page_request(None, Some(1))))
        .expect("should list customers");
    assert_eq!(total, 2);
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].name.as_str(), "Eva Blue");

    let order = repo
        .create_beer_order(&NewBeerOrder {
            customer_id: customer.id,
            customer_ref: Some(CustomerRef::new("PO-1").expect("valid ref")),
        })
        .expect("should create order");
    let orders = repo
        .list_orders_for_customer(customer.id)
        .expect("should list orders");
    assert_eq!(orders, vec![order]);

    assert_eq!(repo.delete_customer(customer.id).expect("should delete"), 1);
    assert!(
        repo.list_orders_for_customer(customer.id)
            .expect("should list orders")
            .is_empty()
    );
    assert_eq!(repo.count_customers().expect("should count"), 1);
}

//! Populate the configured database with a sample four-generation family
//! and print a few engine answers as a smoke check.

use anyhow::Result;
use chrono::NaiveDate;
use kintree::db::{migrate, Db};
use kintree::{Config, KinshipEngine, NewPerson, Person, RelationKind, Store};
use std::path::Path;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn names(persons: &[Person]) -> Vec<String> {
    persons.iter().map(Person::full_name).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    ).init();

    let config = Config::load()?;
    let db = Db::new(config.db_path());
    let migrations_dir = Path::new("migrations");
    db.with_connection(|conn| migrate::run_migrations(conn, migrations_dir))
        .await?;

    let store = Store::new(db);

    let existing = store.all_persons().await?;
    if !existing.is_empty() {
        log::warn!(
            "Database already contains {} persons; seeding anyway adds a second copy of the sample family",
            existing.len()
        );
    }

    log::info!("Adding grandparents...");
    let jan = store
        .add_person(NewPerson {
            given_name: "Jan".to_string(),
            family_name: "Kowalski".to_string(),
            birth_date: date(1940, 5, 15),
            death_date: date(2015, 12, 20),
            sex: Some("M".to_string()),
            birth_place: Some("Warszawa".to_string()),
            death_place: Some("Warszawa".to_string()),
            notes: Some("Paternal grandfather".to_string()),
            ..NewPerson::default()
        })
        .await?;
    let maria_sr = store
        .add_person(NewPerson {
            given_name: "Maria".to_string(),
            family_name: "Kowalska".to_string(),
            birth_date: date(1942, 8, 10),
            sex: Some("K".to_string()),
            birth_place: Some("Kraków".to_string()),
            notes: Some("Paternal grandmother".to_string()),
            ..NewPerson::default()
        })
        .await?;

    log::info!("Adding parents...");
    let piotr = store
        .add_person(NewPerson {
            given_name: "Piotr".to_string(),
            family_name: "Nowak".to_string(),
            birth_date: date(1948, 12, 1),
            sex: Some("M".to_string()),
            birth_place: Some("Gdańsk".to_string()),
            ..NewPerson::default()
        })
        .await?;
    let anna = store
        .add_person(NewPerson {
            given_name: "Anna".to_string(),
            family_name: "Nowak".to_string(),
            birth_date: date(1950, 3, 20),
            sex: Some("K".to_string()),
            birth_place: Some("Kraków".to_string()),
            ..NewPerson::default()
        })
        .await?;

    log::info!("Adding children and grandchildren...");
    let maria = store
        .add_person(NewPerson::named("Maria", "Nowak", date(1975, 8, 10)))
        .await?;
    let tomasz = store
        .add_person(NewPerson::named("Tomasz", "Nowak", date(1977, 12, 25)))
        .await?;
    let kasia = store
        .add_person(NewPerson::named("Katarzyna", "Kowalska", date(2000, 6, 15)))
        .await?;
    let jakub = store
        .add_person(NewPerson::named("Jakub", "Kowalski", date(2002, 9, 3)))
        .await?;

    store.add_relation(jan, maria_sr, RelationKind::Spouse).await?;
    store.add_relation(piotr, anna, RelationKind::Spouse).await?;
    store.add_relation(jan, piotr, RelationKind::Parent).await?;
    store.add_relation(maria_sr, piotr, RelationKind::Parent).await?;
    store.add_relation(piotr, maria, RelationKind::Parent).await?;
    store.add_relation(anna, maria, RelationKind::Parent).await?;
    store.add_relation(piotr, tomasz, RelationKind::Parent).await?;
    store.add_relation(anna, tomasz, RelationKind::Parent).await?;
    store.add_relation(maria, kasia, RelationKind::Parent).await?;
    store.add_relation(maria, jakub, RelationKind::Parent).await?;

    let persons = store.all_persons().await?;
    let relations = store.all_relations().await?;
    println!("Added {} persons:", persons.len());
    for person in &persons {
        let status = match person.death_date {
            Some(d) => format!("d. {}", d),
            None => "living".to_string(),
        };
        let born = person
            .birth_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("  - {} (b. {}, {})", person.full_name(), born, status);
    }

    println!("\nAdded {} relations:", relations.len());
    for rel in &relations {
        println!("  - {}", rel.describe());
    }

    let engine = KinshipEngine::new(store);

    println!("\nEngine smoke check:");
    println!("  Children of Piotr: {:?}", names(&engine.children(piotr).await?));
    println!("  Parents of Maria:  {:?}", names(&engine.parents(maria).await?));
    let spouse = engine.spouse(piotr).await?;
    println!(
        "  Spouse of Piotr:   {}",
        spouse.map(|p| p.full_name()).unwrap_or_else(|| "none".to_string())
    );
    println!("  Siblings of Maria: {:?}", names(&engine.siblings(maria).await?));

    let ancestors = engine.ancestors(kasia, config.max_generations()).await?;
    println!("\nAncestors of Katarzyna ({} found):", ancestors.len());
    for entry in &ancestors {
        println!("  Generation {}: {}", entry.generation, entry.person.full_name());
    }

    let descendants = engine.descendants(jan, config.max_generations()).await?;
    println!("\nDescendants of Jan ({} found):", descendants.len());
    for entry in &descendants {
        println!("  Generation {}: {}", entry.generation, entry.person.full_name());
    }

    println!("\nSample data written to {}", config.db_path().display());
    Ok(())
}

//! Kinship query CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use kintree::db::{migrate, Db};
use kintree::{AncestryEntry, Config, KinshipEngine, Person, Store};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Query the family database: kinship, lineage, paths")]
struct Args {
    /// Emit JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every person on file
    List,
    /// Search persons by given or family name
    Search { query: String },
    /// Show a single person
    Show { id: i64 },
    /// Parents of a person
    Parents { id: i64 },
    /// Children of a person
    Children { id: i64 },
    /// Spouse of a person (first marriage record only)
    Spouse { id: i64 },
    /// Siblings sharing at least one parent
    Siblings { id: i64 },
    /// Ancestors up to a generation bound
    Ancestors {
        id: i64,
        /// Override the configured generation bound
        #[arg(long)]
        generations: Option<u32>,
    },
    /// Descendants up to a generation bound
    Descendants {
        id: i64,
        #[arg(long)]
        generations: Option<u32>,
    },
    /// Shortest relational path between two persons
    Path { from: i64, to: i64 },
    /// Human-readable kinship label between two persons
    Degree { from: i64, to: i64 },
}

fn print_person(person: &Person) {
    let born = person
        .birth_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "?".to_string());
    let status = match person.death_date {
        Some(d) => format!("d. {}", d),
        None => "living".to_string(),
    };
    println!("  [{}] {} (b. {}, {})", person.id, person.full_name(), born, status);
}

fn print_persons(persons: &[Person], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(persons)?);
        return Ok(());
    }
    if persons.is_empty() {
        println!("No results.");
    }
    for person in persons {
        print_person(person);
    }
    Ok(())
}

fn print_entries(entries: &[AncestryEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No results.");
    }
    for entry in entries {
        println!("  Generation {}: [{}] {}", entry.generation, entry.person.id, entry.person.full_name());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load()?;

    let db = Db::new(config.db_path());
    let migrations_dir = Path::new("migrations");
    db.with_connection(|conn| migrate::run_migrations(conn, migrations_dir))
        .await?;

    let store = Store::new(db);
    let engine = KinshipEngine::new(store.clone());
    let json = args.json;

    match args.command {
        Command::List => {
            print_persons(&store.all_persons().await?, json)?;
        }
        Command::Search { query } => {
            print_persons(&store.search_persons(&query).await?, json)?;
        }
        Command::Show { id } => match store.person(id).await? {
            Some(person) if json => println!("{}", serde_json::to_string_pretty(&person)?),
            Some(person) => {
                print_person(&person);
                if let Some(place) = &person.birth_place {
                    println!("    born in {}", place);
                }
                if let Some(notes) = &person.notes {
                    println!("    {}", notes);
                }
            }
            None => println!("No person with id {}", id),
        },
        Command::Parents { id } => {
            print_persons(&engine.parents(id).await?, json)?;
        }
        Command::Children { id } => {
            print_persons(&engine.children(id).await?, json)?;
        }
        Command::Spouse { id } => match engine.spouse(id).await? {
            Some(person) if json => println!("{}", serde_json::to_string_pretty(&person)?),
            Some(person) => print_person(&person),
            None => println!("No spouse on file."),
        },
        Command::Siblings { id } => {
            print_persons(&engine.siblings(id).await?, json)?;
        }
        Command::Ancestors { id, generations } => {
            let bound = generations.unwrap_or_else(|| config.max_generations());
            print_entries(&engine.ancestors(id, bound).await?, json)?;
        }
        Command::Descendants { id, generations } => {
            let bound = generations.unwrap_or_else(|| config.max_generations());
            print_entries(&engine.descendants(id, bound).await?, json)?;
        }
        Command::Path { from, to } => match engine.relationship_path(from, to).await? {
            Some(path) if json => println!("{}", serde_json::to_string_pretty(&path)?),
            Some(path) => {
                let steps: Vec<String> = path.iter().map(Person::full_name).collect();
                println!("{} ({} hops)", steps.join(" -> "), path.len() - 1);
            }
            None => println!("No connection found."),
        },
        Command::Degree { from, to } => match engine.relation_degree(from, to).await? {
            Some(label) if json => println!("{}", serde_json::to_string(&label)?),
            Some(label) => println!("{}", label),
            None => println!("Not related (or unknown person)."),
        },
    }

    Ok(())
}

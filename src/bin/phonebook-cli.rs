use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "phonebook-cli")]
#[command(about = "Command-line client for the phonebook service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every person
    List,
    /// Show one person
    Get { id: String },
    /// Add a person
    Add { name: String, number: String },
    /// Replace a person's name and number
    Update {
        id: String,
        name: String,
        number: String,
    },
    /// Delete a person
    Delete { id: String },
    /// Show the service info page
    Info,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let persons = format!("{}/api/persons", base);

    match cli.command {
        Commands::List => {
            let res = client.get(&persons).send().await?;
            print_response(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/{}", persons, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Add { name, number } => {
            let res = client
                .post(&persons)
                .json(&json!({ "name": name, "number": number }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Update { id, name, number } => {
            let res = client
                .put(format!("{}/{}", persons, id))
                .json(&json!({ "name": name, "number": number }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Delete { id } => {
            let res = client.delete(format!("{}/{}", persons, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Info => {
            let res = client.get(format!("{}/info", base)).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{}", text);
            } else {
                eprintln!("Error: phonebook returned status {}", status);
                eprintln!("Response: {}", text);
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: phonebook returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        return Ok(());
    }

    let text = res.text().await?;
    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

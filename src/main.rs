use anyhow::Result;
use log::info;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thaifood::dataset;
use thaifood::food_model::FoodDatabase;
use thaifood::gemini::GeminiClient;
use thaifood::responder;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Thai food chatbot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Optional first argument: path to a JSON dataset; defaults to the
    // built-in sample data.
    let db = match env::args().nth(1) {
        Some(path) => dataset::load_database(&PathBuf::from(path))?,
        None => {
            info!("No dataset path given, using built-in sample data");
            FoodDatabase::sample()
        }
    };

    // With an API key the Gemini responder takes over; otherwise the
    // heuristic pipeline answers.
    let gemini = env::var("GEMINI_API_KEY").ok().map(GeminiClient::new);
    match &gemini {
        Some(_) => info!("GEMINI_API_KEY set, answering via Gemini"),
        None => info!("No GEMINI_API_KEY, answering via the heuristic pipeline"),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            continue;
        }

        let answer = match &gemini {
            Some(client) => client.answer_question(question, &db).await,
            None => responder::answer_question(question, &db),
        };
        println!("{answer}\n");
    }

    Ok(())
}

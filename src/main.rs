use anyhow::Result;
use clap::Parser;

use studybuilder::engine::{FormEngine, Wizard};
use studybuilder::schema::protocol_schema;
use studybuilder::script::{apply_script, load_script_file};

/// studybuilder - drive the protocol form engine from an edit script
#[derive(Parser)]
#[command(name = "studybuilder")]
#[command(version)]
#[command(about = "Form tree state engine for the clinical study protocol builder", long_about = None)]
struct Cli {
    /// Edit script to replay against a fresh document (.yaml, .yml, or .json)
    script: Option<String>,

    /// Submit after replaying and print the submitted document as JSON
    #[arg(short, long)]
    submit: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut wizard = Wizard::new(FormEngine::new(protocol_schema()));

    if let Some(script_path) = cli.script {
        let ops = load_script_file(&script_path)?;
        apply_script(wizard.engine_mut(), &ops)?;
    }

    if cli.submit {
        match wizard.submit() {
            Ok(document) => {
                println!("{}", serde_json::to_string_pretty(&document)?);
            }
            Err(incomplete) => {
                eprintln!("Submission blocked. Missing required fields:");
                for path in &incomplete.missing {
                    eprintln!("  {}", path);
                }
                std::process::exit(1);
            }
        }
    } else {
        let missing = wizard.engine().missing_fields();
        if missing.is_empty() {
            println!("Document is complete and ready to submit.");
        } else {
            println!("{} required field(s) still missing:", missing.len());
            for path in &missing {
                println!("  {}", path);
            }
        }
    }

    Ok(())
}

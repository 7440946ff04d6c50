use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tabwriter::TabWriter;

use cap_io::edit::EditTelemetry;
use cap_io::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "cap", version, about = "CAP policy document engine CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format a generation result JSON into a policy document JSON.
    Normalize {
        /// Input generation result JSON path
        input: String,
        /// Document id stamped into the policy
        #[arg(long, default_value = "policy-1")]
        id: String,
        /// Format the editable variant instead of the generated one
        #[arg(long)]
        editable: bool,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
    /// Print a section/subsection outline of a policy document.
    Inspect {
        /// Policy document JSON path
        input: String,
    },
    /// Validate an edit script's shape.
    Validate {
        /// Edit script JSON path
        script: String,
    },
    /// Apply an edit script to a policy document.
    Apply {
        /// Policy document JSON path
        policy: String,
        /// Edit script JSON path
        script: String,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
        /// Emit deterministic telemetry JSON on stderr
        #[arg(long)]
        telemetry: bool,
    },
    /// Save a policy document into a directory store.
    Save {
        /// Policy document JSON path
        policy: String,
        /// Store directory
        #[arg(long)]
        dir: String,
        /// Timestamp string recorded by the store
        #[arg(long, default_value = "")]
        stamp: String,
    },
    /// Load a policy document from a directory store.
    Load {
        /// Document id to load
        id: String,
        /// Store directory
        #[arg(long)]
        dir: String,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Normalize {
            input,
            id,
            editable,
            min,
        } => {
            let raw = match read_generation(&input) {
                Ok(raw) => raw,
                Err(msg) => fail(1, &msg),
            };
            let variant = if editable {
                Variant::Editable
            } else {
                Variant::Generated
            };
            let policy = format_policy(&raw, &id, variant);
            print_json(&policy, min)?;
        }

        Command::Inspect { input } => {
            let policy = match read_policy(&input) {
                Ok(policy) => policy,
                Err(msg) => fail(1, &msg),
            };
            print_outline(&policy)?;
        }

        Command::Validate { script } => {
            let script = match read_script(&script) {
                Ok(script) => script,
                Err(msg) => fail(1, &msg),
            };
            match validate_script(&script) {
                Ok(()) => {
                    println!("OK");
                    process::exit(0);
                }
                Err(msg) => {
                    // Exact error string, stable for CI / integrations.
                    fail(2, &msg)
                }
            }
        }

        Command::Apply {
            policy,
            script,
            min,
            telemetry,
        } => {
            let doc = match read_policy(&policy) {
                Ok(doc) => doc,
                Err(msg) => fail(1, &msg),
            };
            let script = match read_script(&script) {
                Ok(script) => script,
                Err(msg) => fail(1, &msg),
            };

            let started = Instant::now();
            let result = apply_script(&doc, &script);
            if telemetry {
                let report = telemetry_report(&doc, &script, &result, started);
                eprintln!("{}", serde_json::to_string(&report)?);
            }
            match result {
                Ok(outcome) => print_json(&outcome.policy, min)?,
                Err(msg) => fail(2, &msg),
            }
        }

        Command::Save { policy, dir, stamp } => {
            let doc = match read_policy(&policy) {
                Ok(doc) => doc,
                Err(msg) => fail(1, &msg),
            };
            let mut store = DirStore {
                dir: PathBuf::from(dir),
                stamp,
            };
            match save_policy(&mut store, &doc) {
                Ok(()) => println!("saved {}", doc.id),
                Err(SaveError::NothingToSave) => fail(2, &SaveError::NothingToSave.to_string()),
                Err(e) => fail(1, &e.to_string()),
            }
        }

        Command::Load { id, dir, min } => {
            let store = DirStore {
                dir: PathBuf::from(dir),
                stamp: String::new(),
            };
            match load_policy(&store, &id) {
                Ok(policy) => print_json(&policy, min)?,
                Err(e) => fail(1, &e.to_string()),
            }
        }
    }

    Ok(())
}

fn read_generation(path: &str) -> Result<GenerationResult, String> {
    let s = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_generation_json_str(&s).map_err(|e| e.to_string())
}

fn read_policy(path: &str) -> Result<Policy, String> {
    let s = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_policy_json_str(&s).map_err(|e| e.to_string())
}

fn read_script(path: &str) -> Result<EditScriptV1, String> {
    let s = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&s).map_err(|e| e.to_string())
}

fn print_json<T: serde::Serialize>(value: &T, min: bool) -> anyhow::Result<()> {
    let out = if min {
        serialize::to_minified_json(value)?
    } else {
        serialize::to_pretty_json(value)?
    };
    println!("{out}");
    Ok(())
}

fn print_outline(policy: &Policy) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(std::io::stdout());
    writeln!(tw, "sectionId\tsection\tsubsectionId\tsubsection\tpreview")?;
    for section in &policy.sections {
        for sub in &section.subsections {
            let text = match &sub.body {
                Body::Single(body) => body.clone(),
                Body::Split(reasonable, unreasonable) => {
                    format!("{reasonable} | {unreasonable}")
                }
            };
            writeln!(
                tw,
                "{}\t{}\t{}\t{}\t{}",
                section.id,
                section.title,
                sub.id,
                sub.title,
                preview(&text)
            )?;
        }
    }
    tw.flush()?;
    Ok(())
}

/// Bounded single-line preview, with ellipsis when truncated.
fn preview(text: &str) -> String {
    const MAX: usize = 80;
    let flat = text.replace(['\n', '\t'], " ");
    let mut chars = flat.chars();
    let head: String = chars.by_ref().take(MAX - 1).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

fn telemetry_report(
    doc: &Policy,
    script: &EditScriptV1,
    result: &Result<ScriptOutcome, String>,
    started: Instant,
) -> EditTelemetry {
    let (script_ops, ops_by_type, target_sections, target_subsections) =
        EditTelemetry::op_counts(&script.ops);
    EditTelemetry {
        op: "apply".to_string(),
        ok: result.is_ok(),
        elapsed_ms: started.elapsed().as_millis() as u64,
        script_v: script.v,
        script_ops,
        ops_by_type,
        target_sections,
        target_subsections,
        sections_before: Some(doc.sections.len()),
        sections_after: result.as_ref().ok().map(|o| o.policy.sections.len()),
        error: result.as_ref().err().cloned(),
    }
}

fn fail(code: i32, msg: &str) -> ! {
    eprintln!("{msg}");
    process::exit(code);
}

/// File-per-document store: `{dir}/{id}.json` holds a `PolicyRecord`.
struct DirStore {
    dir: PathBuf,
    stamp: String,
}

impl DirStore {
    fn path(&self, policy_id: &str) -> PathBuf {
        self.dir.join(format!("{policy_id}.json"))
    }
}

impl PolicyStore for DirStore {
    fn load(&self, policy_id: &str) -> Result<PolicyRecord, StoreError> {
        let path = self.path(policy_id);
        let s = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(policy_id.to_string()));
            }
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };
        serde_json::from_str(&s).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn save(&mut self, policy_id: &str, payload: &SavePayload) -> Result<(), StoreError> {
        let created_at = match self.load(policy_id) {
            Ok(existing) => existing.created_at,
            Err(StoreError::NotFound(_)) => self.stamp.clone(),
            Err(e) => return Err(e),
        };
        let record = PolicyRecord {
            heading: payload.policy.heading.clone(),
            sections: payload.policy.sections.clone(),
            created_at,
            updated_at: self.stamp.clone(),
        };

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        let out = serde_json::to_string_pretty(&record)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(self.path(policy_id), out).map_err(|e| StoreError::Backend(e.to_string()))
    }
}

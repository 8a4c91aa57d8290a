//! PhenoAge Toolkit CLI
//!
//! The `phenoage` command calculates phenotypic (biological) age from nine
//! clinical biomarkers plus chronological age, positions it against
//! population percentiles, and ranks or simulates lifestyle interventions.
//!
//! ## Commands
//!
//! - `calculate`: Clock outputs for a single biomarker set
//! - `percentile`: Percentile assessment for a known phenotypic age
//! - `rank`: Interventions ranked by impact
//! - `simulate`: Combined effect of selected interventions
//! - `assess`: Complete assessment with recommendations
//! - `process`: Batch-process a TSV/CSV file
//! - `list-interventions`: Show the intervention catalog
//! - `create-example`: Write an example input file

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::{info, Level};

use phenoage_core::{
    complete_assessment, compute_phenoage, interpret_percentile, percentile, process_records,
    rank_interventions, reference_values, simulate_with_percentiles, BatchOptions,
    BiomarkerPanel, Intervention, Record,
};

#[derive(Parser)]
#[command(name = "phenoage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "PhenoAge Toolkit - biological age calculator and intervention simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The ten biomarker flags shared by every single-subject command.
#[derive(Args)]
struct BiomarkerArgs {
    /// Albumin (g/dL)
    #[arg(long)]
    albumin: f64,

    /// Creatinine (mg/dL)
    #[arg(long)]
    creatinine: f64,

    /// Fasting glucose (mg/dL)
    #[arg(long)]
    glucose: f64,

    /// C-reactive protein (mg/L)
    #[arg(long)]
    crp: f64,

    /// Lymphocyte percentage (%)
    #[arg(long)]
    lymphocyte: f64,

    /// Mean cell volume (fL)
    #[arg(long)]
    mcv: f64,

    /// Red cell distribution width (%)
    #[arg(long)]
    rdw: f64,

    /// Alkaline phosphatase (U/L)
    #[arg(long)]
    alp: f64,

    /// White blood cell count (10^3 cells/µL)
    #[arg(long)]
    wbc: f64,

    /// Chronological age (years)
    #[arg(long)]
    age: f64,
}

impl BiomarkerArgs {
    fn panel(&self) -> BiomarkerPanel {
        BiomarkerPanel {
            albumin: self.albumin,
            creatinine: self.creatinine,
            glucose: self.glucose,
            crp: self.crp,
            lymphocyte: self.lymphocyte,
            mcv: self.mcv,
            rdw: self.rdw,
            alkaline_phosphatase: self.alp,
            wbc: self.wbc,
            chronological_age: self.age,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tsv,
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate age clocks for a single set of biomarkers
    Calculate {
        #[command(flatten)]
        biomarkers: BiomarkerArgs,
    },

    /// Percentile assessment for a known phenotypic age
    Percentile {
        /// Chronological age in years
        #[arg(long)]
        age: f64,

        /// Phenotypic age in years
        #[arg(long)]
        phenoage: f64,
    },

    /// Rank interventions by their impact on PhenoAge
    Rank {
        #[command(flatten)]
        biomarkers: BiomarkerArgs,
    },

    /// Simulate combined effects of multiple interventions
    Simulate {
        #[command(flatten)]
        biomarkers: BiomarkerArgs,

        /// Comma-separated list of intervention names
        #[arg(short, long)]
        interventions: String,
    },

    /// Complete assessment with phenotypic age, percentile, and
    /// recommendations
    Assess {
        #[command(flatten)]
        biomarkers: BiomarkerArgs,

        /// Path to output file (JSON format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Process a TSV/CSV file with biomarker data
    Process {
        /// Path to input file (tab-separated unless it ends in .csv)
        input: PathBuf,

        /// Path to output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file format
        #[arg(short, long, value_enum, default_value = "tsv")]
        format: OutputFormat,

        /// Append the top-5 intervention rankings per individual
        #[arg(short, long)]
        rank: bool,

        /// Comma-separated list of interventions to apply to each individual
        #[arg(short, long)]
        apply: Option<String>,
    },

    /// List the intervention catalog in order
    ListInterventions,

    /// Create an example input file with sample data
    CreateExample {
        /// Where to write the example file
        #[arg(default_value = "example_biomarkers.tsv")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    phenoage_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Calculate { biomarkers } => cmd_calculate(&biomarkers.panel()),
        Commands::Percentile { age, phenoage } => cmd_percentile(age, phenoage),
        Commands::Rank { biomarkers } => cmd_rank(&biomarkers.panel()),
        Commands::Simulate {
            biomarkers,
            interventions,
        } => cmd_simulate(&biomarkers.panel(), &interventions),
        Commands::Assess { biomarkers, output } => {
            cmd_assess(&biomarkers.panel(), output.as_deref())
        }
        Commands::Process {
            input,
            output,
            format,
            rank,
            apply,
        } => cmd_process(&input, output.as_deref(), format, rank, apply.as_deref()),
        Commands::ListInterventions => cmd_list_interventions(),
        Commands::CreateExample { path } => cmd_create_example(&path),
    }
}

/// Print the clock outputs for a single panel
fn cmd_calculate(panel: &BiomarkerPanel) -> Result<()> {
    let result = compute_phenoage(panel)?;
    println!("\nPhenoAge Calculation Results:");
    println!("  Linear Combination: {:.4}", result.lin_comb);
    println!("  Mortality Score: {:.4}", result.mort_score);
    println!("  PhenoAge: {:.4} years", result.pheno_age);
    println!("  Estimated DNAm Age: {:.4} years", result.est_dnam_age);
    println!("  Estimated D MScore: {:.4}", result.est_d_mscore);
    Ok(())
}

/// Percentile assessment for a chronological/phenotypic age pair
fn cmd_percentile(age: f64, phenoage: f64) -> Result<()> {
    let pct = percentile(age, phenoage);
    let refs = reference_values(age);

    let age_diff = age - phenoage;
    let age_diff_text = if age_diff > 0.0 {
        format!("{age_diff:.1} years YOUNGER than your actual age")
    } else if age_diff < 0.0 {
        format!("{:.1} years OLDER than your actual age", -age_diff)
    } else {
        "exactly matching your chronological age".to_string()
    };

    println!("\n===== PHENOTYPIC AGE ASSESSMENT =====");
    println!("Chronological Age: {age:.1} years");
    println!("Phenotypic Age: {phenoage:.1} years");
    println!("\nYour biological age is {age_diff_text}");
    println!("\nYou are in the {pct:.1}th percentile");
    println!("This means: {}", interpret_percentile(pct));

    println!("\n--- Reference Values for Your Age ---");
    println!(
        "10th percentile (less healthy than 90% of people): {:.1} years",
        refs.p10
    );
    println!(
        "25th percentile (less healthy than 75% of people): {:.1} years",
        refs.p25
    );
    println!("50th percentile (median): {:.1} years", refs.p50);
    println!(
        "75th percentile (healthier than 75% of people): {:.1} years",
        refs.p75
    );
    println!(
        "90th percentile (healthier than 90% of people): {:.1} years",
        refs.p90
    );
    Ok(())
}

/// Rank all interventions, printing the new percentile for each
fn cmd_rank(panel: &BiomarkerPanel) -> Result<()> {
    let ranking = rank_interventions(panel)?;
    let base = compute_phenoage(panel)?.pheno_age;
    let base_pct = percentile(panel.chronological_age, base);

    println!("\nBaseline PhenoAge: {base:.2} years (Percentile: {base_pct:.2})");
    println!("Interventions ranked by improvement (best first):\n");
    for entry in &ranking {
        let new_pct = percentile(panel.chronological_age, entry.new_pheno_age);
        println!(
            "- {}: new PhenoAge = {:.2} years (delta={:.2} years, new percentile: {:.2})",
            entry.intervention, entry.new_pheno_age, entry.delta, new_pct
        );
    }
    Ok(())
}

/// Simulate a combined set of interventions with percentile context
fn cmd_simulate(panel: &BiomarkerPanel, interventions: &str) -> Result<()> {
    let names: Vec<&str> = interventions.split(',').map(str::trim).collect();
    let report = simulate_with_percentiles(panel, &names)?;

    println!("\nCombined Intervention Simulation:");
    println!(
        "Original PhenoAge: {:.2} years",
        report.simulation.original_pheno_age
    );
    println!("New PhenoAge: {:.2} years", report.simulation.new_pheno_age);
    println!("Improvement: {:.2} years", -report.simulation.delta);

    println!("\nPercentile Assessment:");
    println!("Original Percentile: {:.2}", report.original_percentile);
    println!("New Percentile: {:.2}", report.new_percentile);
    println!("Percentile Improvement: {:.2}", report.percentile_change);
    println!("Original Interpretation: {}", report.original_interpretation);
    println!("New Interpretation: {}", report.new_interpretation);

    println!("\nInterventions applied:");
    for (i, name) in report.simulation.applied_interventions.iter().enumerate() {
        println!("  {}. {name}", i + 1);
    }

    println!("\nBiomarker Changes:");
    for change in &report.biomarker_changes {
        println!(
            "  {}: {:.2} → {:.2} (change: {:+.2})",
            change.biomarker, change.original_value, change.new_value, change.change
        );
    }
    Ok(())
}

/// Complete assessment plus top-5 recommendations, optionally saved as JSON
fn cmd_assess(panel: &BiomarkerPanel, output: Option<&Path>) -> Result<()> {
    let complete = complete_assessment(panel)?;
    let a = &complete.assessment;

    println!("\n===== PHENOTYPIC AGE ASSESSMENT =====");
    println!("Chronological Age: {:.1} years", a.chronological_age);
    println!("Phenotypic Age: {:.1} years", a.phenotypic_age);
    println!("Percentile: {:.1}", a.percentile);
    println!("Interpretation: {}", a.interpretation);
    println!("Age Difference: {}", a.age_difference_text);

    println!("\n===== INTERVENTION RECOMMENDATIONS =====");
    println!("Top 5 interventions ranked by potential impact:");
    for (i, entry) in complete.rankings.iter().take(5).enumerate() {
        println!(
            "{}. {}: {:.2} years younger",
            i + 1,
            entry.intervention,
            -entry.delta
        );
    }

    if let Some(path) = output {
        write_json(path, &serde_json::to_value(&complete)?)?;
        println!("\nComplete assessment saved to {}", path.display());
    }
    Ok(())
}

/// Batch-process an input file, annotating each row
fn cmd_process(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    rank: bool,
    apply: Option<&str>,
) -> Result<()> {
    let (headers, records) = read_records(input)?;
    info!(rows = records.len(), "processing {}", input.display());

    let options = BatchOptions {
        rank,
        apply: apply
            .map(|list| list.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default(),
    };
    let results = process_records(&records, &options);

    match (output, format) {
        (Some(path), OutputFormat::Json) => {
            write_json(path, &serde_json::to_value(&results)?)?;
            println!("Results saved to {}", path.display());
        }
        (Some(path), _) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_table(file, delimiter_for(format), &headers, &results)?;
            println!("Results saved to {}", path.display());
        }
        (None, OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        (None, _) => {
            write_table(std::io::stdout().lock(), delimiter_for(format), &headers, &results)?;
        }
    }
    Ok(())
}

/// Print the catalog, one intervention per line
fn cmd_list_interventions() -> Result<()> {
    for intervention in Intervention::ALL {
        println!("{intervention}");
    }
    Ok(())
}

/// Write an example input file with two sample subjects
fn cmd_create_example(path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record([
        "ID",
        "Sex",
        "Collection_Date",
        "albumin",
        "creatinine",
        "glucose",
        "crp",
        "lymphocyte",
        "mcv",
        "rdw",
        "alkaline_phosphatase",
        "wbc",
        "chronological_age",
    ])?;
    writer.write_record([
        "SUBJ001",
        "M",
        "2024-10-15",
        "4.47",
        "1.17",
        "77",
        "0.07",
        "36",
        "90",
        "13.7",
        "54",
        "4.5",
        "46",
    ])?;
    writer.write_record([
        "SUBJ002",
        "F",
        "2024-10-16",
        "4.2",
        "0.9",
        "85",
        "0.12",
        "32",
        "88",
        "12.9",
        "62",
        "5.2",
        "39",
    ])?;
    writer.flush()?;

    println!("Created {} with sample data", path.display());
    println!("\nFile Format Description:");
    println!("- Each row represents a different subject");
    println!("- Columns contain biomarker values and metadata");
    println!("- Required biomarkers for PhenoAge calculation:");
    println!("  * albumin (g/dL)");
    println!("  * creatinine (mg/dL)");
    println!("  * glucose (mg/dL)");
    println!("  * crp (mg/L)");
    println!("  * lymphocyte (%)");
    println!("  * mcv (fL)");
    println!("  * rdw (%)");
    println!("  * alkaline_phosphatase (U/L)");
    println!("  * wbc (10^3 cells/µL)");
    println!("  * chronological_age (years)");
    println!("- Additional metadata columns are optional");
    Ok(())
}

/// Read a delimited file into records, keeping the header order.
fn read_records(path: &Path) -> Result<(Vec<String>, Vec<Record>)> {
    let delimiter = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
        b','
    } else {
        b'\t'
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("Input file has no header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("Malformed input row")?;
        let mut record = Record::new();
        for (header, field) in headers.iter().zip(row.iter()) {
            record.insert(header.clone(), Value::String(field.to_string()));
        }
        records.push(record);
    }
    Ok((headers, records))
}

/// Write records as a delimited table: input columns first (original order),
/// then any appended columns.
fn write_table<W: Write>(
    writer: W,
    delimiter: u8,
    input_headers: &[String],
    records: &[Record],
) -> Result<()> {
    let mut columns: Vec<String> = input_headers.to_vec();
    for record in records {
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    writer.write_record(&columns)?;
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).map(field_text).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn delimiter_for(format: OutputFormat) -> u8 {
    match format {
        OutputFormat::Csv => b',',
        _ => b'\t',
    }
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

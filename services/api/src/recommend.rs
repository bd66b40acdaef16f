use crate::infra::{load_catalog, read_profile};
use admit_compass::catalog::University;
use admit_compass::config::AppConfig;
use admit_compass::error::AppError;
use admit_compass::profile::StudentProfile;
use admit_compass::scoring::{compute_strength, rank_by, FitReport, FitScoreCalculator};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Student profile as a JSON document
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Catalog CSV export (defaults to APP_CATALOG_CSV, then the built-in catalog)
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Only print the first N universities
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct StrengthArgs {
    /// Student profile as a JSON document
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        profile,
        catalog_csv,
        limit,
    } = args;

    let profile = read_profile(&profile)?;
    let catalog_csv = match catalog_csv {
        Some(path) => Some(path),
        None => AppConfig::load()?.catalog.seed_csv,
    };
    let universities = load_catalog(catalog_csv.as_deref())?;

    let ranked = ranked_reports(&profile, universities, limit);
    println!("University recommendations ({} shown)", ranked.len());
    for (position, (university, report)) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {} ({}) - fit {} [{}]",
            position + 1,
            university.name,
            university.country,
            report.score,
            report.category
        );
        for component in &report.components {
            println!(
                "      {:?}: {}/{} {}",
                component.factor, component.earned, component.weight, component.notes
            );
        }
    }

    Ok(())
}

pub(crate) fn run_strength(args: StrengthArgs) -> Result<(), AppError> {
    let profile = read_profile(&args.profile)?;
    let strength = compute_strength(Some(&profile));

    println!("Profile strength: {}/100", strength.overall);
    println!("- Academics: {}", strength.academics);
    println!("- Exams: {}", strength.exams);
    println!("- Statement of purpose: {}", strength.sop);
    Ok(())
}

fn ranked_reports(
    profile: &StudentProfile,
    universities: Vec<University>,
    limit: Option<usize>,
) -> Vec<(University, FitReport)> {
    let calculator = FitScoreCalculator::default();
    let scored = universities
        .into_iter()
        .map(|university| {
            let report = calculator.evaluate_university(profile, &university);
            (university, report)
        })
        .collect();

    let mut ranked = rank_by(scored, |(_, report): &(University, FitReport)| {
        Some(report.score)
    });
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

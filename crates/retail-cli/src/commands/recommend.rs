//! Persona recommendation command

use std::path::Path;

use anyhow::Result;
use retail_core::models::split_list;
use retail_core::{ranking_strategy, AnalyticsConfig, Persona, Recommender};

use super::{load_snapshot, print_json, save_snapshot, truncate};

/// Build a persona from survey-style command-line answers
pub fn persona_from_args(
    budget: &str,
    hobbies: &str,
    brands: Option<&str>,
    job: Option<&str>,
) -> Persona {
    Persona {
        name: None,
        job_type: job.unwrap_or_default().trim().to_string(),
        working_hours: String::new(),
        budget_range: budget.trim().to_string(),
        hobbies: split_list(hobbies),
        favorite_brands: brands.map(split_list).unwrap_or_default(),
        dietary_choices: vec![],
    }
}

pub fn cmd_recommend(
    data_path: &Path,
    config: &AnalyticsConfig,
    persona: Persona,
    strategy: &str,
    save_persona: bool,
    json: bool,
) -> Result<()> {
    let mut snapshot = load_snapshot(data_path)?;

    let recommender =
        Recommender::with_policy(config.recommend.clone()).with_strategy(ranking_strategy(strategy)?);
    let recommendations = recommender.recommend(&snapshot.products, &persona, &snapshot.events)?;

    if save_persona {
        snapshot.personas.push(persona.clone());
        save_snapshot(data_path, &snapshot)?;
        tracing::info!(personas = snapshot.personas.len(), "Persona saved");
    }

    if json {
        return print_json(&recommendations);
    }

    if recommendations.is_empty() {
        println!(
            "No products match a {} budget and hobbies [{}].",
            persona.budget_range,
            persona.hobbies.join(", ")
        );
        return Ok(());
    }

    println!();
    println!(
        "🎁 Recommendations ({} ranking, {} matches)",
        recommender.strategy_name(),
        recommendations.len()
    );
    println!("   ─────────────────────────────────────────────────────────────");
    for rec in &recommendations {
        let p = &rec.product;
        let mut marker = String::new();
        if rec.boost > 1.0 {
            marker.push_str(" 🔥");
        }
        if rec.brand_match {
            marker.push_str(" ⭐");
        }
        println!(
            "   {} {:<28} {:>10.2}  {:<12} demand {:>3}{}",
            if p.glyph.is_empty() { "•" } else { p.glyph.as_str() },
            truncate(&p.name, 28),
            p.price,
            truncate(&p.category, 12),
            p.demand,
            marker
        );
    }
    if save_persona {
        println!();
        println!("   💾 Persona saved to {}", data_path.display());
    }
    println!();
    Ok(())
}

use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use idle_sim::stage_reward;

pub fn run(data: Option<&Path>) -> Result<(), String> {
    let catalog = super::load_catalog(data)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stage", "Name", "Location", "Waves", "Power", "Reward", "Kind"]);

    let mut count = 0;
    for location in &catalog.locations {
        for stage in &location.stages {
            let kind = match (stage.is_boss, stage.is_farmable) {
                (true, _) => "boss",
                (false, true) => "farmable",
                (false, false) => "—",
            };
            table.add_row(vec![
                stage.id.to_string(),
                stage.name.clone(),
                format!("{} ({:?})", location.biome, location.difficulty),
                stage.wave_count().to_string(),
                stage.recommended_power.to_string(),
                stage_reward(f64::from(stage.recommended_power), 1.0).to_string(),
                kind.to_string(),
            ]);
            count += 1;
        }
    }

    if count == 0 {
        println!("  No stages found.");
        return Ok(());
    }

    println!("{table}");
    println!();
    println!("  {count} stages");

    Ok(())
}

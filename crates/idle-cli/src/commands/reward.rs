use colored::Colorize;
use idle_sim::reward::GOLD_PER_ESSENCE;
use idle_sim::stage_reward;

pub fn run(power: f64, multiplier: f64) -> Result<(), String> {
    if !power.is_finite() || !multiplier.is_finite() {
        return Err("power and multiplier must be finite numbers".into());
    }

    let gold = stage_reward(power, multiplier);
    println!(
        "  {} {}",
        "Reward".bold(),
        format!("(power={power}, multiplier={multiplier})").dimmed()
    );
    println!("  Gold:    {gold}");
    println!("  Essence: {}", gold / GOLD_PER_ESSENCE);

    Ok(())
}

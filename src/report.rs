use agrocast::logic::CropCatalog;
use agrocast::models::{
    FarmingMode, PlantingCalendar, RankedCrop, RecommendationContext, Season, WeatherAlert,
    WeatherSnapshot,
};
use chrono::DateTime;

pub fn season(season: Season) -> String {
    let months: Vec<_> = season.planting_months().iter().map(|m| m.name()).collect();
    format!(
        "Season: {}\nPlanting months: {}",
        season_label(season),
        months.join(", ")
    )
}

fn season_label(season: Season) -> &'static str {
    match season {
        Season::Rainy => "Rainy (November - March)",
        Season::CoolDry => "Cool dry (April - July)",
        Season::HotDry => "Hot dry (August - October)",
    }
}

fn mode_label(mode: Option<FarmingMode>) -> &'static str {
    mode.map(|m| m.label()).unwrap_or("not set")
}

pub fn recommendations(context: &RecommendationContext, ranked: &[RankedCrop<'_>]) -> String {
    let mut lines = vec![format!(
        "Season: {} | Region: {} | Mode: {}",
        season_label(context.season),
        context
            .region
            .map(|r| r.label())
            .unwrap_or("Any region"),
        mode_label(context.farming_mode),
    )];

    if context.farming_mode.is_none() {
        lines.push("No farming mode set. Run `agrocast init` or pass --mode.".into());
    }

    if ranked.is_empty() {
        lines.push("No crops recommended for these conditions.".into());
        return lines.join("\n");
    }

    lines.push(String::new());
    for (i, entry) in ranked.iter().enumerate() {
        let crop = entry.crop;
        lines.push(format!(
            "{:>2}. {:<14} score {:<2} water {:<6} {} days",
            i + 1,
            crop.name,
            entry.score,
            crop.water_requirement,
            crop.growth_duration_days
        ));
        lines.push(format!("    {}", crop.description));
    }

    lines.join("\n")
}

pub fn calendar(calendar: &PlantingCalendar) -> String {
    let best = calendar.best_planting_month_names();
    [
        calendar.crop.clone(),
        format!(
            "Best planting months: {}",
            if best.is_empty() {
                "none".to_string()
            } else {
                best.join(", ")
            }
        ),
        format!(
            "Next planting month:  {}",
            calendar.next_planting_month_name().unwrap_or("none")
        ),
        format!("Growth duration:      {} days", calendar.growth_duration_days),
        format!("Water requirement:    {}", calendar.water_requirement),
        format!("Tips: {}", calendar.tips),
    ]
    .join("\n")
}

pub fn weather(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let mut lines = vec![format!(
        "Now: {:.1}°C, {:.0}% humidity, {}",
        current.temp_c,
        current.humidity_percent,
        current.condition()
    )];

    for (i, day) in snapshot.daily.iter().enumerate() {
        let condition = day.condition();
        lines.push(format!(
            "Day {}: {:.0}-{:.0}°C, {:.0}% chance of rain, {}{}",
            i + 1,
            day.temp_min_c,
            day.temp_max_c,
            day.precipitation_prob * 100.0,
            condition,
            if condition.is_wet() { " (wet)" } else { "" }
        ));
    }

    lines.join("\n")
}

fn timestamp(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| epoch.to_string())
}

pub fn alerts(alerts: &[WeatherAlert]) -> String {
    if alerts.is_empty() {
        return "No weather alerts.".into();
    }

    alerts
        .iter()
        .map(|alert| {
            let mut block = vec![format!(
                "! {} ({} to {})",
                alert.event,
                timestamp(alert.start),
                timestamp(alert.end)
            )];
            if let Some(sender) = &alert.sender_name {
                block.push(format!("  Issued by {}", sender));
            }
            if !alert.description.is_empty() {
                block.push(format!("  {}", alert.description));
            }
            block.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn crops(catalog: &CropCatalog) -> String {
    catalog
        .crops()
        .iter()
        .map(|crop| {
            let seasons: Vec<_> = crop.seasons.iter().map(|s| s.as_str()).collect();
            let regions: Vec<_> = crop.regions.iter().map(|r| r.label()).collect();
            let mut modes = Vec::new();
            if crop.greenhouse_suitable {
                modes.push(FarmingMode::Greenhouse.label());
            }
            if crop.open_field_suitable {
                modes.push(FarmingMode::OpenField.label());
            }
            format!(
                "{:<14} {:<24} {:<40} {}",
                crop.name,
                seasons.join(","),
                regions.join(", "),
                modes.join(" / ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

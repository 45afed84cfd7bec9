use console::{StyledObject, style};

use vision_core::{
    Action, Segment, StatusTone, format_score, format_segment_readable, format_segment_timestamp,
};

fn status_badge(status: &str) -> StyledObject<String> {
    let badge = style(format!(" {} ", status.to_uppercase())).bold();
    match StatusTone::classify(status) {
        StatusTone::Success => badge.black().on_green(),
        StatusTone::Pending => badge.black().on_yellow(),
        StatusTone::Reviewing => badge.black().on_cyan(),
        StatusTone::Neutral => badge.white().on_black(),
    }
}

/// Print the result panel for one action
pub fn print_panel(action: Action, segments: &[Segment], plain: bool) {
    println!(
        "\n{}  {}",
        style(action.panel_title()).white().bold(),
        style(format!("({})", segments.len())).dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    if segments.is_empty() {
        println!("{}", style(action.empty_hint()).dim());
        return;
    }

    for segment in segments {
        if plain {
            print!("{}", format_segment_readable(segment));
        } else {
            print_segment(segment);
        }
        println!();
    }
}

fn print_segment(segment: &Segment) {
    let mut headline = Vec::new();
    if let Some(status) = &segment.status {
        headline.push(status_badge(status).to_string());
    }
    headline.push(style(format_segment_timestamp(segment)).bold().to_string());
    if let Some(score) = segment.score {
        headline.push(style(format_score(score)).dim().to_string());
    }
    println!("{}", headline.join("  "));

    if let Some(summary) = &segment.summary {
        println!("  {}", summary);
    }

    match &segment.clip_url {
        Some(url) => println!("  {} {}", style("▶").cyan(), style(url).cyan().underlined()),
        None => println!(
            "  {}",
            style("No clip URL returned for this segment.").dim()
        ),
    }
}

/// Print segments of one or more actions as a JSON object keyed by action
pub fn print_json(results: &[(Action, Vec<Segment>)]) -> anyhow::Result<()> {
    let mut output = serde_json::Map::new();
    for (action, segments) in results {
        output.insert(action.name().to_string(), serde_json::to_value(segments)?);
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

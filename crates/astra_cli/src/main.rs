use std::fs;
use std::path::PathBuf;

use astra_chart::{
    BirthInfo, Confidence, HouseSystem, NatalChart, deg_to_dms, sign_position,
};
use astra_ephem::Provider;
use astra_horoscope::{
    Category, FriendlyHoroscope, InterpretationMode, InterpretationSection, Personalization,
    RuleTable, Topic, build_daily, compose_friendly, resolve_interpretation,
};
use astra_time::{CivilDate, CivilTime, JulianDay, TimezoneSpec};
use astra_transit::{Transit, TransitSnapshot, active_transits_within};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "astra", about = "Astra natal chart and horoscope CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Zodiac sign from ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        deg: f64,
    },
    /// Compute a natal chart
    Chart {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Birth time (hh:mm or hh:mm:ss, local); local noon is assumed when omitted
        #[arg(long)]
        time: Option<String>,
        /// Timezone: IANA name (Europe/Moscow), offset hours (+3, -5.5), or utc
        #[arg(long, default_value = "utc")]
        zone: String,
        /// Latitude in degrees (north positive)
        #[arg(long)]
        lat: f64,
        /// Longitude in degrees (east positive)
        #[arg(long)]
        lon: f64,
        /// House system: placidus (default) or whole-sign
        #[arg(long, default_value = "placidus")]
        houses: String,
    },
    /// Active transits to a natal chart
    Transits {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Birth time (hh:mm or hh:mm:ss, local); local noon is assumed when omitted
        #[arg(long)]
        time: Option<String>,
        /// Timezone: IANA name (Europe/Moscow), offset hours (+3, -5.5), or utc
        #[arg(long, default_value = "utc")]
        zone: String,
        /// Latitude in degrees (north positive)
        #[arg(long)]
        lat: f64,
        /// Longitude in degrees (east positive)
        #[arg(long)]
        lon: f64,
        /// House system: placidus (default) or whole-sign
        #[arg(long, default_value = "placidus")]
        houses: String,
        /// UTC instant to probe (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        at: String,
        /// Activation orb ceiling in degrees
        #[arg(long, default_value = "3")]
        orb: f64,
    },
    /// Daily horoscope for a chart
    Horoscope {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Birth time (hh:mm or hh:mm:ss, local); local noon is assumed when omitted
        #[arg(long)]
        time: Option<String>,
        /// Timezone: IANA name (Europe/Moscow), offset hours (+3, -5.5), or utc
        #[arg(long, default_value = "utc")]
        zone: String,
        /// Latitude in degrees (north positive)
        #[arg(long)]
        lat: f64,
        /// Longitude in degrees (east positive)
        #[arg(long)]
        lon: f64,
        /// House system: placidus (default) or whole-sign
        #[arg(long, default_value = "placidus")]
        houses: String,
        /// UTC instant to read the sky at (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        at: String,
        /// Path to a JSON rule table; the built-in table is used when omitted
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Name to greet in the opening line
        #[arg(long)]
        name: Option<String>,
        /// Use the formal greeting
        #[arg(long)]
        formal: bool,
        /// Drop the emoji section prefixes
        #[arg(long)]
        no_emoji: bool,
        /// Emit the document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interpret the natal chart itself
    Interpret {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Birth time (hh:mm or hh:mm:ss, local); local noon is assumed when omitted
        #[arg(long)]
        time: Option<String>,
        /// Timezone: IANA name (Europe/Moscow), offset hours (+3, -5.5), or utc
        #[arg(long, default_value = "utc")]
        zone: String,
        /// Latitude in degrees (north positive)
        #[arg(long)]
        lat: f64,
        /// Longitude in degrees (east positive)
        #[arg(long)]
        lon: f64,
        /// House system: placidus (default) or whole-sign
        #[arg(long, default_value = "placidus")]
        houses: String,
        /// Reading depth: easy, friendly (default), or deep
        #[arg(long, default_value = "friendly")]
        mode: String,
        /// Narrow to one topic: love, career, health, or growth
        #[arg(long)]
        topic: Option<String>,
    },
}

fn parse_civil_date(s: &str) -> Result<CivilDate, String> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(format!("expected YYYY-MM-DD, got {s}"));
    }
    let year: i32 = parts[0].parse().map_err(|e| format!("{e}"))?;
    let month: u32 = parts[1].parse().map_err(|e| format!("{e}"))?;
    let day: u32 = parts[2].parse().map_err(|e| format!("{e}"))?;
    Ok(CivilDate::new(year, month, day))
}

fn parse_civil_time(s: &str) -> Result<CivilTime, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(format!("expected hh:mm or hh:mm:ss, got {s}"));
    }
    let hour: u32 = parts[0].parse().map_err(|e| format!("{e}"))?;
    let minute: u32 = parts[1].parse().map_err(|e| format!("{e}"))?;
    let second: f64 = if parts.len() == 3 {
        parts[2].parse().map_err(|e| format!("{e}"))?
    } else {
        0.0
    };
    Ok(CivilTime::new(hour, minute, second))
}

fn parse_zone(s: &str) -> TimezoneSpec {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return TimezoneSpec::Utc;
    }
    if let Ok(hours) = trimmed.parse::<f64>() {
        return TimezoneSpec::FixedHours(hours);
    }
    TimezoneSpec::Named(trimmed.to_string())
}

fn parse_house_system(s: &str) -> HouseSystem {
    match s.to_lowercase().as_str() {
        "placidus" => HouseSystem::Placidus,
        "whole-sign" | "wholesign" | "whole" => HouseSystem::WholeSign,
        _ => {
            eprintln!("Invalid house system: {s}");
            eprintln!("Valid: placidus (default), whole-sign");
            std::process::exit(1);
        }
    }
}

// Parse "YYYY-MM-DDThh:mm:ssZ" or without the trailing Z.
fn parse_utc_instant(s: &str) -> Result<JulianDay, String> {
    let s = s.trim_end_matches('Z');
    let parts: Vec<&str> = s.split('T').collect();
    if parts.len() != 2 {
        return Err(format!("expected YYYY-MM-DDThh:mm:ssZ, got {s}"));
    }
    let date = parse_civil_date(parts[0])?;
    let time = parse_civil_time(parts[1])?;
    Ok(JulianDay::from_civil_utc(date, time))
}

fn require_instant(s: &str) -> JulianDay {
    parse_utc_instant(s).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn parse_mode(s: &str) -> InterpretationMode {
    s.parse().unwrap_or_else(|e: String| {
        eprintln!("{e}");
        eprintln!("Valid: easy, friendly (default), deep");
        std::process::exit(1);
    })
}

fn parse_topic(s: &str) -> Topic {
    s.parse().unwrap_or_else(|e: String| {
        eprintln!("{e}");
        eprintln!("Valid: love, career, health, growth");
        std::process::exit(1);
    })
}

fn birth_from_args(
    date: &str,
    time: Option<&str>,
    zone: &str,
    lat: f64,
    lon: f64,
    houses: &str,
) -> BirthInfo {
    let date = parse_civil_date(date).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let time = time.map(|t| {
        parse_civil_time(t).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        })
    });
    BirthInfo::new(date, time, parse_zone(zone), lat, lon, parse_house_system(houses))
}

fn compute_chart(provider: &Provider, birth: &BirthInfo) -> NatalChart {
    NatalChart::compute(provider, birth).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn capture_snapshot(provider: &Provider, jd: JulianDay) -> TransitSnapshot {
    TransitSnapshot::capture(provider, jd).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn load_rules(path: &PathBuf) -> RuleTable {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read rules file: {e}");
        std::process::exit(1);
    });
    RuleTable::from_json(&json).unwrap_or_else(|e| {
        eprintln!("Failed to load rules: {e}");
        std::process::exit(1);
    })
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sign { lon } => {
            let pos = sign_position(lon);
            println!(
                "{} {} - {} ({:.4} deg into the sign)",
                pos.sign.name(),
                pos.sign.glyph(),
                pos.dms,
                pos.degrees_in_sign
            );
        }

        Commands::Dms { deg } => {
            println!("{}", deg_to_dms(deg));
        }

        Commands::Chart {
            date,
            time,
            zone,
            lat,
            lon,
            houses,
        } => {
            let birth = birth_from_args(&date, time.as_deref(), &zone, lat, lon, &houses);
            let provider = Provider::detect();
            let chart = compute_chart(&provider, &birth);
            print_chart(&chart);
        }

        Commands::Transits {
            date,
            time,
            zone,
            lat,
            lon,
            houses,
            at,
            orb,
        } => {
            let birth = birth_from_args(&date, time.as_deref(), &zone, lat, lon, &houses);
            let provider = Provider::detect();
            let chart = compute_chart(&provider, &birth);
            let snapshot = capture_snapshot(&provider, require_instant(&at));
            let transits = active_transits_within(&snapshot, &chart, orb);
            print_transits(&snapshot, &transits);
        }

        Commands::Horoscope {
            date,
            time,
            zone,
            lat,
            lon,
            houses,
            at,
            rules,
            name,
            formal,
            no_emoji,
            json,
        } => {
            let birth = birth_from_args(&date, time.as_deref(), &zone, lat, lon, &houses);
            let provider = Provider::detect();
            let chart = compute_chart(&provider, &birth);
            let snapshot = capture_snapshot(&provider, require_instant(&at));
            let table = match &rules {
                Some(path) => load_rules(path),
                None => RuleTable::builtin(),
            };
            let (day, _) = snapshot.jd_ut().to_civil_utc();
            let document = build_daily(&chart, &snapshot, &table, day);
            let who = Personalization {
                name,
                emoji: !no_emoji,
                formal,
                extra_blocklist: Vec::new(),
            };
            let friendly = compose_friendly(&document, &who);
            if json {
                let out = serde_json::to_string_pretty(&friendly).unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                });
                println!("{out}");
            } else {
                print_horoscope(&friendly);
            }
        }

        Commands::Interpret {
            date,
            time,
            zone,
            lat,
            lon,
            houses,
            mode,
            topic,
        } => {
            let birth = birth_from_args(&date, time.as_deref(), &zone, lat, lon, &houses);
            let provider = Provider::detect();
            let chart = compute_chart(&provider, &birth);
            let mode = parse_mode(&mode);
            let topic = topic.as_deref().map(parse_topic);
            let sections = resolve_interpretation(&chart, mode, topic);
            print_interpretation(&sections);
        }
    }
}

fn print_chart(chart: &NatalChart) {
    let b = &chart.birth;
    println!(
        "Natal chart for {:04}-{:02}-{:02} at {:.4}°, {:.4}° (JD UT {:.5})",
        b.date.year,
        b.date.month,
        b.date.day,
        b.latitude_deg,
        b.longitude_deg,
        chart.jd_ut.ut()
    );
    println!(
        "Sun {}   Moon {}   Rising {}   (ephemeris {})\n",
        chart.big_three.sun.name(),
        chart.big_three.moon.name(),
        chart.big_three.ascendant.name(),
        chart.source
    );

    println!(
        "{:<10} {:>10}  {:<12} {:<12} {:>5}  {:>3}",
        "Body", "Longitude", "Sign", "Position", "House", "Rx"
    );
    println!("{}", "-".repeat(60));
    for p in &chart.placements {
        println!(
            "{:<10} {:>9.4}°  {:<12} {:<12} {:>5}  {:>3}",
            p.body.name(),
            p.state.lon_deg,
            p.position.sign.name(),
            p.position.dms.to_string(),
            p.house.map_or("-".to_string(), |h| h.to_string()),
            if p.is_retrograde() { "R" } else { "" },
        );
    }

    let wheel = &chart.houses;
    let confidence = match wheel.confidence {
        Confidence::Exact => "exact",
        Confidence::Low => "low confidence",
    };
    println!();
    println!("House cusps ({}, {}):", wheel.system.name(), confidence);
    for (i, cusp) in wheel.cusps_deg.iter().enumerate() {
        let pos = sign_position(*cusp);
        println!(
            "  {:>2}  {:>9.4}°  {:<12} {}",
            i + 1,
            cusp,
            pos.sign.name(),
            pos.dms
        );
    }
    println!(
        "  Ascendant {:.4}°   MC {:.4}°",
        wheel.ascendant_deg, wheel.mc_deg
    );

    if !chart.aspects.is_empty() {
        println!();
        println!("Aspects:");
        for a in &chart.aspects {
            println!("  {a}");
        }
    }

    if !chart.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &chart.warnings {
            println!("  {w}");
        }
    }
}

fn print_transits(snapshot: &TransitSnapshot, transits: &[Transit]) {
    let (date, time) = snapshot.jd_ut().to_civil_utc();
    println!(
        "Transits at {:04}-{:02}-{:02} {:02}:{:02} UTC (ephemeris {})\n",
        date.year,
        date.month,
        date.day,
        time.hour,
        time.minute,
        snapshot.grade()
    );

    if transits.is_empty() {
        println!("No active contacts inside the orb.");
        return;
    }

    println!(
        "{:<12} {:<12} {:<12} {:>7} {:>9}  {:<10}",
        "Transiting", "Aspect", "Natal", "Orb", "Strength", "Phase"
    );
    println!("{}", "-".repeat(70));
    for t in transits {
        println!(
            "{:<12} {:<12} {:<12} {:>6.2}° {:>9.2}  {:<10}{}",
            t.transiting.name(),
            t.kind.name(),
            t.natal.name(),
            t.orb_deg,
            t.strength,
            if t.applying { "applying" } else { "separating" },
            if t.transiting_retrograde { "  R" } else { "" },
        );
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Love => "Love",
        Category::Work => "Work",
        Category::Health => "Health",
        Category::Growth => "Growth",
    }
}

fn print_horoscope(doc: &FriendlyHoroscope) {
    println!("Horoscope for {}\n", doc.date_iso);
    for line in &doc.tldr {
        println!("{line}");
    }

    if !doc.key_transits.is_empty() {
        println!();
        println!("Key transits:");
        for k in &doc.key_transits {
            println!("  {k}");
        }
    }

    println!();
    for (category, text) in doc.sections.iter() {
        println!("{:<8} {}", format!("{}:", category_label(category)), text);
    }

    println!();
    println!("Morning: {}", doc.timeline.morning);
    println!("Day:     {}", doc.timeline.day);
    println!("Evening: {}", doc.timeline.evening);
    println!();
    println!("{}", doc.moon_tip);
}

fn print_interpretation(sections: &[InterpretationSection]) {
    for s in sections {
        println!("{}", s.title);
        println!("  {}\n", s.content);
    }
}

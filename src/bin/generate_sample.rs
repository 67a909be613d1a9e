use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (splitmix64)
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const FIRST_NAMES: [&str; 10] = [
    "Alejandro", "Bruno", "Carlos", "Diego", "Emiliano", "Federico", "Gonzalo", "Hugo", "Iván",
    "Javier",
];
const LAST_NAMES: [&str; 10] = [
    "García", "Fernández", "López", "Martínez", "Rossi", "Silva", "Torres", "Ruiz", "Costa",
    "Moreno",
];
const POSITIONS: [&str; 14] = [
    "GK", "CB", "LCB, CB", "LB", "LB, LWB", "RB", "RWB, RB", "DMF", "LCMF, DMF", "RCMF", "AMF",
    "RW, RWF", "LW, LWF", "CF",
];

struct Competition {
    file: &'static str,
    teams: [&'static str; 4],
    passports: [&'static str; 4],
    players: usize,
}

fn ratio(rng: &mut SplitMix, lo: f64, hi: f64) -> f64 {
    (rng.between(lo, hi) * 100.0).round() / 100.0
}

fn write_competition(comp: &Competition, rng: &mut SplitMix) -> Result<()> {
    let mut names = Vec::new();
    let mut teams = Vec::new();
    let mut ages = Vec::new();
    let mut heights = Vec::new();
    let mut positions = Vec::new();
    let mut passports = Vec::new();
    let mut def_duels = Vec::new();
    let mut def_won = Vec::new();
    let mut off_duels = Vec::new();
    let mut off_won = Vec::new();

    for _ in 0..comp.players {
        names.push(format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)));
        teams.push(rng.pick(&comp.teams).to_string());
        ages.push(rng.between(17.0, 37.0) as i64);
        heights.push(rng.between(165.0, 198.0).round());
        positions.push(rng.pick(&POSITIONS).to_string());
        passports.push(rng.pick(&comp.passports).to_string());
        def_duels.push(ratio(rng, 1.0, 12.0));
        def_won.push(ratio(rng, 40.0, 80.0));
        off_duels.push(ratio(rng, 0.5, 15.0));
        off_won.push(ratio(rng, 20.0, 60.0));
    }

    let text = |name: &str| Field::new(name, DataType::Utf8, false);
    let float = |name: &str| Field::new(name, DataType::Float64, false);
    let schema = Arc::new(Schema::new(vec![
        text("Full name"),
        text("Team within selected timeframe"),
        Field::new("Age", DataType::Int64, false),
        float("Height"),
        text("Position"),
        text("Passport country"),
        float("Defensive duels per 90"),
        float("Defensive duels won, %"),
        float("Offensive duels per 90"),
        float("Offensive duels won, %"),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(names)),
        Arc::new(StringArray::from(teams)),
        Arc::new(Int64Array::from(ages)),
        Arc::new(Float64Array::from(heights)),
        Arc::new(StringArray::from(positions)),
        Arc::new(StringArray::from(passports)),
        Arc::new(Float64Array::from(def_duels)),
        Arc::new(Float64Array::from(def_won)),
        Arc::new(Float64Array::from(off_duels)),
        Arc::new(Float64Array::from(off_won)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let path = format!("{}.parquet", comp.file);
    let file = std::fs::File::create(&path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {} players to {path}", comp.players);
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(42);

    let competitions = [
        Competition {
            file: "LaLiga_2024",
            teams: ["Real Betis", "Sevilla", "Valencia", "Getafe"],
            passports: ["Spain", "Argentina", "Spain, Morocco", "Uruguay"],
            players: 80,
        },
        Competition {
            file: "SerieA_2024",
            teams: ["Torino", "Bologna", "Udinese", "Genoa"],
            passports: ["Italy", "Brazil", "Italy, Argentina", "Spain"],
            players: 80,
        },
        Competition {
            file: "LigaMX_2024",
            teams: ["Toluca", "Pachuca", "Necaxa", "León"],
            passports: ["Mexico", "Colombia", "Mexico, United States", "Argentina"],
            players: 60,
        },
    ];

    for comp in &competitions {
        write_competition(comp, &mut rng)?;
    }
    Ok(())
}

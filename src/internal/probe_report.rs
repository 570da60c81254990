//! Inserts random keys into open addressing maps built with each hash function and
//! plots how table load and probe lengths evolve as the tables grow.
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

use plotters::prelude::*;
use probemap::{
    KeyHasher, MapError, OpenAddressingMap, SipKeyHasher, hash_function_1, hash_function_2,
};
use rand::Rng;

const INITIAL_CAPACITY: usize = 11;
const NUM_KEYS: usize = 2_000;
const KEY_LENGTH: usize = 8;
// Mean probe length is recomputed over every live key, so only sample periodically
const SAMPLE_EVERY: usize = 50;

struct Sample {
    inserted: usize,
    capacity: usize,
    table_load: f64,
    empty_buckets: usize,
    mean_probes: f64,
}

struct Series {
    name: &'static str,
    samples: Vec<Sample>,
    /// Number of keys inserted before an insert failed, and why
    failure: Option<(usize, MapError)>,
}

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| (0..KEY_LENGTH).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect())
        .collect()
}

fn mean_probe_length<H: KeyHasher>(map: &OpenAddressingMap<usize, H>) -> f64 {
    let (total, count) = map
        .iter()
        .filter_map(|(key, _)| map.probe_length(key))
        .fold((0usize, 0usize), |(total, count), probes| (total + probes, count + 1));

    if count == 0 { 0.0 } else { total as f64 / count as f64 }
}

fn run<H: KeyHasher>(name: &'static str, hasher: H, keys: &[String]) -> Series {
    let mut map = OpenAddressingMap::new(INITIAL_CAPACITY, hasher);
    let mut samples = Vec::with_capacity(keys.len() / SAMPLE_EVERY);

    for (index, key) in keys.iter().enumerate() {
        if let Err(error) = map.insert(key.as_str(), index) {
            return Series { name, samples, failure: Some((index, error)) };
        }

        let inserted = index + 1;
        if inserted % SAMPLE_EVERY == 0 {
            samples.push(Sample {
                inserted,
                capacity: map.capacity(),
                table_load: map.table_load(),
                empty_buckets: map.empty_buckets(),
                mean_probes: mean_probe_length(&map),
            });
        }
    }

    Series { name, samples, failure: None }
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[Series],
    metric: impl Fn(&Sample) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];

    let max_y = series.iter().flat_map(|s| s.samples.iter()).map(&metric).fold(0.0, f64::max) *
        1.1; // Add 10% margin
    let max_y = if max_y > 0.0 { max_y } else { 1.0 };

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (s, color) in series.iter().zip(colors.iter().cycle()) {
        let line_style = ShapeStyle::from(color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                s.samples.iter().map(|sample| (sample.inserted, metric(sample))),
                line_style,
            ))?
            .label(s.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let keys = random_keys(NUM_KEYS);

    let series = vec![
        run("hash_function_1", hash_function_1, &keys),
        run("hash_function_2", hash_function_2, &keys),
        run("SipHash", SipKeyHasher, &keys),
    ];

    for s in &series {
        println!("{}:", s.name);
        for sample in &s.samples {
            println!(
                "  {:>5} keys: capacity = {:>5}, load = {:.3}, empty = {:>5}, mean probes = {:.2}",
                sample.inserted,
                sample.capacity,
                sample.table_load,
                sample.empty_buckets,
                sample.mean_probes
            );
        }
        if let Some((inserted, error)) = &s.failure {
            println!("  stopped after {inserted} keys: {error}");
        }
    }

    draw_chart("table_load.png", "Table Load While Inserting", "Table Load", &series, |s| {
        s.table_load
    })?;
    draw_chart(
        "probe_length.png",
        "Mean Probe Length of Live Keys",
        "Probes per Lookup",
        &series,
        |s| s.mean_probes,
    )?;

    println!("Generated plot images: table_load.png, probe_length.png");

    Ok(())
}

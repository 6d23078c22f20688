use crate::models::metric::{MetricPoint, MetricSeries, ProjectMetricBundle, RawMetricRecord};
use serde_json::Value;

/// Coerce a raw value to a finite number; anything unusable becomes 0.
pub fn coerce_value(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Convert raw records for one metric into a series sorted ascending by time.
pub fn normalize_series(records: &[RawMetricRecord]) -> MetricSeries {
    let mut series: MetricSeries = records
        .iter()
        .map(|record| MetricPoint {
            time: record.time.clone(),
            value: coerce_value(&record.value),
        })
        .collect();
    // Stable: duplicate timestamps keep arrival order
    series.sort_by(|a, b| a.time.cmp(&b.time));
    series
}

/// Normalize the JSON object returned for one project.
///
/// A metric that is not an array is dropped; inside an array, entries that
/// are not objects are skipped and the rest of the series is kept.
pub fn normalize_bundle(raw: &Value) -> ProjectMetricBundle {
    let mut bundle = ProjectMetricBundle::new();
    let Some(metrics) = raw.as_object() else {
        log::warn!("metric payload is not a JSON object; treating as empty");
        return bundle;
    };

    for (name, records) in metrics {
        let Some(entries) = records.as_array() else {
            log::warn!("dropping metric '{name}': expected an array of records");
            continue;
        };
        let records: Vec<RawMetricRecord> = entries
            .iter()
            .filter_map(|entry| {
                let record = read_record(entry);
                if record.is_none() {
                    log::warn!("skipping malformed record in '{name}': {entry}");
                }
                record
            })
            .collect();
        bundle.insert(name.clone(), normalize_series(&records));
    }

    bundle
}

fn read_record(entry: &Value) -> Option<RawMetricRecord> {
    let fields = entry.as_object()?;
    let time = match fields.get("time") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    Some(RawMetricRecord {
        time,
        value: fields.get("value").cloned().unwrap_or(Value::Null),
    })
}

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sanitize_mac::{Event, Filter, MacForm, MacSanitizer, SanitizeMacConfig};
use std::sync::Arc;
use tracing::debug;

// Re-export external crates needed by benches and e2e tests
pub use sanitize_mac;
pub use serde_json;
pub use tracing_subscriber;

/// Field names used by the generated events.
pub const CLIENT_MAC_FIELD: &str = "client_mac";
pub const SERVER_MAC_FIELD: &str = "server_mac";

pub struct SanitizerBenchFixture {
    pub sanitizer: Arc<MacSanitizer>,
    pub events: Vec<Event>,
}

impl SanitizerBenchFixture {
    /// Sanitizer rewriting both MAC fields in place, plus `count` events
    /// whose values cycle through every accepted surface form.
    pub fn new(separator: &str, fixcase: &str, count: usize) -> Self {
        let config = SanitizeMacConfig::new(Default::default(), separator, fixcase)
            .with_field(CLIENT_MAC_FIELD, CLIENT_MAC_FIELD)
            .with_field(SERVER_MAC_FIELD, SERVER_MAC_FIELD);
        let sanitizer = config.build().expect("bench sanitizer config");
        Self {
            sanitizer: Arc::new(sanitizer),
            events: mixed_events(count, 0x5eed),
        }
    }
}

/// Renders `octets` in `form`, randomly dropping leading zeros where the
/// form allows it and randomly mixing letter case.
pub fn render_mac<R: Rng>(rng: &mut R, octets: [u8; 6], form: MacForm) -> String {
    let hex: String = octets.iter().map(|o| format!("{o:02x}")).collect();
    let hex: String = hex
        .chars()
        .map(|c| if rng.gen_bool(0.5) { c.to_ascii_uppercase() } else { c })
        .collect();

    let (width, separator) = match form {
        MacForm::Colon => (2, ":"),
        MacForm::Hyphen => (2, "-"),
        MacForm::Cisco => (4, "."),
        MacForm::Bare => return hex,
    };

    (0..hex.len())
        .step_by(width)
        .map(|start| {
            let group = &hex[start..start + width];
            let trimmed = match group.trim_start_matches('0') {
                "" => "0",
                rest => rest,
            };
            if rng.gen_bool(0.3) {
                trimmed.to_string()
            } else {
                group.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Generates events carrying the same kind of MAC values a RADIUS server
/// sees from clients outside of local control, plus some noise.
pub fn mixed_events(count: usize, seed: u64) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let form = MacForm::ALL[i % MacForm::ALL.len()];
            let client: [u8; 6] = rng.gen();
            let server: [u8; 6] = rng.gen();
            let client_mac = render_mac(&mut rng, client, form);
            let server_mac = if i % 5 == 4 {
                "unknown".to_string()
            } else {
                render_mac(&mut rng, server, MacForm::ALL[(i + 1) % MacForm::ALL.len()])
            };
            let value = serde_json::json!({
                CLIENT_MAC_FIELD: client_mac,
                SERVER_MAC_FIELD: server_mac,
                "seq": i,
            });
            Event::from_value(value).expect("generated event is an object")
        })
        .collect()
}

/// Runs newline-delimited JSON events through `filters` in order, the way a
/// hosting pipeline would. Returns the output lines and how many events at
/// least one filter matched.
pub fn run_ndjson(filters: &[Box<dyn Filter>], input: &str) -> anyhow::Result<(Vec<String>, usize)> {
    let mut output = Vec::new();
    let mut matched = 0;

    for (line_no, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut event = Event::from_json(line)
            .with_context(|| format!("line {} is not a JSON object", line_no + 1))?;

        let mut any = false;
        for filter in filters {
            if filter.apply(&mut event) {
                debug!(filter = filter.name(), line = line_no + 1, "Filter matched");
                any = true;
            }
        }
        if any {
            matched += 1;
        }
        output.push(event.to_json());
    }

    Ok((output, matched))
}

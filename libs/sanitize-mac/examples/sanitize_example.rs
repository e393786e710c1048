use sanitize_mac::{ConfigurationError, Event, SanitizeMacConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    init_tracing("info");

    // RADIUS accounting records from clients outside of local control
    let config = SanitizeMacConfig::from_json_str(
        r#"{
            "match": {
                "Calling-Station-Id": "client_mac",
                "[nas][mac]": "[nas][mac]"
            },
            "separator": ":",
            "fixcase": "lower",
            "add_tag": ["mac_sanitized"]
        }"#,
    )?;
    let sanitizer = config.build()?;

    let records = [
        r#"{"Calling-Station-Id": "A4-5E-60-E2-11-9B", "nas": {"mac": "0011.22ab.cdef"}}"#,
        r#"{"Calling-Station-Id": "a45e60e2119b"}"#,
        r#"{"Calling-Station-Id": "unknown"}"#,
    ];

    for record in records {
        let mut event = Event::from_json(record)?;
        let matched = sanitizer.apply(&mut event);
        info!(matched, "{}", event.to_json());
    }

    match SanitizeMacConfig::new(Default::default(), "/", "lower").build() {
        Ok(_) => println!("Invalid separator unexpectedly accepted"),
        Err(ConfigurationError::InvalidSeparator { value }) => {
            println!("Rejected separator {value:?} before processing any event");
        }
        Err(err) => println!("Received different error: {err}"),
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_env_filter(filter).with_target(false).compact().init();
}

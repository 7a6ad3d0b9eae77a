use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;

/// Environment variable which holds the filter directives of the console
/// tracer.
pub(crate) const LOG_ENV: &str = "SPIRM_LOG";

/// Directives used by `--trace` when [`LOG_ENV`] is unset, which show every
/// mangled function along with its substitutions.
const MANGLER_DIRECTIVES: &str = "spir_mangle=trace,spir_types=debug,spir_cli=debug";

#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tracer {
    #[default]
    Console,
    #[cfg(feature = "tracing-tracy")]
    Tracy,
}

/// Registers the given tracer as the global subscriber. When `verbose` is set,
/// the console tracer follows the mangler down to substitution level.
pub(crate) fn register_global_tracer(kind: Tracer, verbose: bool) {
    let res = match kind {
        Tracer::Console => {
            let directives = std::env::var(LOG_ENV).ok();

            tracing::subscriber::set_global_default(console_tracer(directives.as_deref(), verbose))
        }
        #[cfg(feature = "tracing-tracy")]
        Tracer::Tracy => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(tracing_tracy::TracyLayer::default()),
        ),
    };

    if res.is_err() {
        eprintln!("warning: a global tracer has already been registered");
    }
}

fn console_tracer(directives: Option<&str>, verbose: bool) -> impl tracing::Subscriber + Send + Sync {
    let format = tracing_subscriber::fmt::format()
        .compact()
        .with_line_number(true)
        .with_target(true);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(format)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(console_filter(directives, verbose))
        .with(fmt_layer)
}

/// Builds the filter of the console tracer. Explicit directives always win
/// over `verbose`.
fn console_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());

    match directives {
        Some(directives) => builder.parse_lossy(directives),
        None if verbose => builder.parse_lossy(MANGLER_DIRECTIVES),
        None => builder.parse_lossy(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_filter() {
        assert_eq!(console_filter(None, false).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_verbose_filter() {
        let filter = console_filter(None, true);

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
        assert!(filter.to_string().contains("spir_mangle=trace"));
    }

    #[test]
    fn test_explicit_directives_win() {
        let filter = console_filter(Some("spir_types=info"), true);

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert!(!filter.to_string().contains("spir_mangle"));
    }
}

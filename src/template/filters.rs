//! Tera bindings for the template helper library.
//!
//! Every helper is exposed as a filter under its template name
//! (`{{ host | hostnameRegex }}`). The two hostname predicates are also
//! registered as testers (`{% if host is isWildcardHostname %}`).

use std::collections::HashMap;

use tera::{Result, Tera, Value};

use super::helpers;
use super::size::parse_size;

/// Filter names registered by [`register`].
pub const FILTER_NAMES: &[&str] = &[
    "backendHash",
    "hostnameRegex",
    "aliasRegex",
    "isWildcardHostname",
    "isRegexHostname",
    "sizeSuffix",
];

/// Tester names registered by [`register`].
pub const TESTER_NAMES: &[&str] = &["isWildcardHostname", "isRegexHostname"];

/// Bind the helper library into a Tera instance.
pub fn register(tera: &mut Tera) {
    tera.register_filter("backendHash", backend_hash);
    tera.register_filter("hostnameRegex", hostname_regex);
    tera.register_filter("aliasRegex", alias_regex);
    tera.register_filter("isWildcardHostname", is_wildcard_hostname);
    tera.register_filter("isRegexHostname", is_regex_hostname);
    tera.register_filter("sizeSuffix", size_suffix);

    tera.register_tester("isWildcardHostname", wildcard_hostname_test);
    tera.register_tester("isRegexHostname", regex_hostname_test);
}

fn expect_str<'a>(value: &'a Value, helper: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        tera::Error::msg(format!("`{helper}` expects a string, got `{value}`"))
    })
}

fn tested_str<'a>(value: Option<&'a Value>, helper: &str) -> Result<&'a str> {
    match value {
        Some(v) => expect_str(v, helper),
        None => Err(tera::Error::msg(format!(
            "`{helper}` tested an undefined value"
        ))),
    }
}

fn backend_hash(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    match value.as_str() {
        Some(endpoint) => Ok(Value::String(helpers::backend_hash(endpoint))),
        None => {
            tracing::error!(value = %value, "invalid type conversion on backendHash template function");
            Ok(Value::String(String::new()))
        }
    }
}

fn hostname_regex(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let hostname = expect_str(value, "hostnameRegex")?;
    Ok(Value::String(helpers::hostname_regex(hostname)))
}

fn alias_regex(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let hostname = expect_str(value, "aliasRegex")?;
    Ok(Value::String(helpers::alias_regex(hostname)))
}

fn is_wildcard_hostname(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let identifier = expect_str(value, "isWildcardHostname")?;
    Ok(Value::Bool(helpers::is_wildcard_hostname(identifier)))
}

fn is_regex_hostname(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let identifier = expect_str(value, "isRegexHostname")?;
    Ok(Value::Bool(helpers::is_regex_hostname(identifier)))
}

fn size_suffix(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let size = expect_str(value, "sizeSuffix")?;
    match parse_size(size) {
        Ok(bytes) => Ok(Value::String(bytes.to_string())),
        Err(e) => {
            tracing::error!(size = %size, error = %e, "Error converting size");
            Ok(Value::String(size.to_string()))
        }
    }
}

fn wildcard_hostname_test(value: Option<&Value>, _args: &[Value]) -> Result<bool> {
    tested_str(value, "isWildcardHostname").map(helpers::is_wildcard_hostname)
}

fn regex_hostname_test(value: Option<&Value>, _args: &[Value]) -> Result<bool> {
    tested_str(value, "isRegexHostname").map(helpers::is_regex_hostname)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tera::Context;

    /// Log sink shared between the test and the fmt subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Run `f` with a subscriber writing into a fresh buffer; return the output.
    fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    fn render(source: &str, context: &Context) -> Result<String> {
        let mut tera = Tera::default();
        register(&mut tera);
        tera.add_raw_template("inline", source)?;
        tera.render("inline", context)
    }

    fn no_args() -> HashMap<String, Value> {
        HashMap::new()
    }

    #[test]
    fn test_backend_hash_non_string_degrades_to_empty() {
        let out = backend_hash(&Value::from(42), &no_args()).unwrap();
        assert_eq!(out, Value::String(String::new()));

        let out = backend_hash(&Value::Null, &no_args()).unwrap();
        assert_eq!(out, Value::String(String::new()));
    }

    #[test]
    fn test_size_suffix_echoes_unparsable_input() {
        let out = size_suffix(&Value::from("not-a-size"), &no_args()).unwrap();
        assert_eq!(out, Value::from("not-a-size"));

        let out = size_suffix(&Value::from("10m"), &no_args()).unwrap();
        assert_eq!(out, Value::from("10485760"));
    }

    #[test]
    fn test_backend_hash_non_string_logs_error() {
        let (out, logs) = capture_logs(|| backend_hash(&Value::from(42), &no_args()).unwrap());
        assert_eq!(out, Value::String(String::new()));
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("invalid type conversion on backendHash"), "{logs}");
    }

    #[test]
    fn test_size_suffix_unparsable_logs_error() {
        let (out, logs) = capture_logs(|| size_suffix(&Value::from("not-a-size"), &no_args()).unwrap());
        assert_eq!(out, Value::from("not-a-size"));
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("not-a-size"), "{logs}");
    }

    #[test]
    fn test_valid_inputs_log_nothing() {
        let (_, logs) = capture_logs(|| {
            backend_hash(&Value::from("10.0.0.1:80"), &no_args()).unwrap();
            size_suffix(&Value::from("10m"), &no_args()).unwrap();
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_typed_helpers_reject_non_strings() {
        assert!(hostname_regex(&Value::from(1), &no_args()).is_err());
        assert!(alias_regex(&Value::Bool(true), &no_args()).is_err());
        assert!(size_suffix(&Value::from(10), &no_args()).is_err());
        assert!(wildcard_hostname_test(None, &[]).is_err());
    }

    #[test]
    fn test_filters_in_template() {
        let mut context = Context::new();
        context.insert("host", "*.example.com");
        context.insert("size", "1k");

        let out = render(
            "{{ host | hostnameRegex }}|{{ host | isWildcardHostname }}|{{ size | sizeSuffix }}",
            &context,
        )
        .unwrap();
        assert_eq!(out, r"^([^\.]+)\.example\.com(:[0-9]+)?$|true|1024");
    }

    #[test]
    fn test_testers_in_template() {
        let mut context = Context::new();
        context.insert("hosts", &vec!["*.a.com", "b.com", "^c[0-9]\\.com$"]);

        let out = render(
            "{% for h in hosts %}{% if h is isWildcardHostname %}W{% elif h is isRegexHostname %}R{% else %}P{% endif %}{% endfor %}",
            &context,
        )
        .unwrap();
        assert_eq!(out, "WPR");
    }

    #[test]
    fn test_all_names_registered() {
        for name in FILTER_NAMES {
            let source = format!("{{{{ 'x' | {name} }}}}");
            assert!(render(&source, &Context::new()).is_ok(), "filter {name}");
        }
        let mut context = Context::new();
        context.insert("h", "x");
        for name in TESTER_NAMES {
            let source = format!("{{% if h is {name} %}}y{{% endif %}}");
            assert!(render(&source, &context).is_ok(), "tester {name}");
        }
    }
}

//! Shared fixtures for render pipeline tests.

use std::io::Write;
use std::sync::Arc;

use proxy_render::template::{Normalizer, Renderer, TemplateHandle};
use serde::Serialize;
use tempfile::NamedTempFile;

/// A cut-down HAProxy template exercising every helper.
pub const HAPROXY_TEMPLATE: &str = r#"
global
    maxconn {{ maxconn }}
    tune.bufsize {{ buffer_size | sizeSuffix }}

frontend httpfront
    bind *:80

{% for host in hosts %}
{% if host.name is isWildcardHostname %}
    acl host-{{ host.backend | backendHash }} hdr(host) -m reg {{ host.name | hostnameRegex }}
{% elif host.name is isRegexHostname %}
    acl host-{{ host.backend | backendHash }} hdr(host) -m reg {{ host.name }}
{% else %}
    acl host-{{ host.backend | backendHash }} hdr(host) -m reg {{ host.name | hostnameRegex }}
{% endif %}
{% for alias in host.aliases %}
    acl host-{{ host.backend | backendHash }} hdr(host) -m reg {{ alias | aliasRegex }}
{% endfor %}

{% endfor %}
{% for host in hosts %}
backend {{ host.backend | backendHash }}
    server s1 {{ host.backend }}

{% endfor %}
"#;

/// Configuration object shaped like the controller's view of ingresses.
#[derive(Debug, Clone, Serialize)]
pub struct TestConfig {
    pub maxconn: u32,
    pub buffer_size: String,
    pub hosts: Vec<TestHost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestHost {
    pub name: String,
    pub backend: String,
    pub aliases: Vec<String>,
}

impl TestHost {
    pub fn new(name: &str, backend: &str) -> Self {
        Self {
            name: name.to_string(),
            backend: backend.to_string(),
            aliases: Vec::new(),
        }
    }
}

/// Write `source` to a temporary template file.
pub fn template_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

/// Compile `source` from disk and wrap it in an in-process renderer.
pub fn renderer_for(source: &str) -> Renderer {
    let file = template_file(source);
    let handle = TemplateHandle::compile("haproxy", file.path()).unwrap();
    Renderer::new(Arc::new(handle), Normalizer::Lines)
}

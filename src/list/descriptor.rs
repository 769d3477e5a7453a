//! Resource descriptors
//!
//! A descriptor is the whole difference between two list resources: where
//! they live, which key wraps their records, and which filters they take.

/// Static description of a listable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Resource name used in log messages (e.g. "Notification")
    pub name: &'static str,
    /// Path template with `{Placeholder}` segments
    pub path_template: &'static str,
    /// Key under which the response nests its record array
    pub envelope_key: &'static str,
    /// Query names of the supported filters, in declaration order
    pub filters: &'static [&'static str],
}

impl ResourceDescriptor {
    /// Substitute path parameters into the template
    ///
    /// Placeholders without a matching parameter are left verbatim.
    pub fn render_path(&self, params: &[(&str, &str)]) -> String {
        let mut path = self.path_template.to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), value);
        }
        path
    }

    /// Whether `name` is one of this resource's filters
    pub fn accepts_filter(&self, name: &str) -> bool {
        self.filters.iter().any(|f| *f == name)
    }
}

/// Criterion, or its CodSpeed drop-in when built with the `codspeed` feature.
#[cfg(feature = "codspeed")]
pub use codspeed_criterion_compat as criterion;
#[cfg(not(feature = "codspeed"))]
pub use criterion;

/// A raw request kept next to the benches, embedded at compile time.
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, file: TestFile) -> Self {
        Self { name, file }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }
}

/// Paths of a route table shaped like a small REST service, in registration order.
pub const ROUTE_PATTERNS: &[(&str, &str)] = &[
    ("GET", "/api/employees"),
    ("POST", "/api/employees"),
    ("GET", "/api/employees/search"),
    ("GET", "/api/employees/stats"),
    ("GET", "/api/employees/:id"),
    ("PUT", "/api/employees/:id"),
    ("DELETE", "/api/employees/:id"),
    ("GET", "/api/departments/:department/employees/:id"),
    ("POST", "/api/employees/import"),
    ("GET", "/api/employees/export"),
];

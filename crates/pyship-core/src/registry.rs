/// Target package index for the upload stage.
///
/// Only two registries exist: production PyPI and TestPyPI. The
/// `repository` selector is what gets forwarded to `twine --repository`;
/// `simple_index` is the matching `pip install --index-url` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registry {
    label: &'static str,
    repository: Option<&'static str>,
    simple_index: Option<&'static str>,
}

const PYPI: Registry = Registry {
    label: "PyPI",
    repository: None,
    simple_index: None,
};

const TEST_PYPI: Registry = Registry {
    label: "TestPyPI",
    repository: Some("testpypi"),
    simple_index: Some("https://test.pypi.org/simple/"),
};

impl Registry {
    #[must_use]
    pub fn select(test_mode: bool) -> Self {
        if test_mode {
            TEST_PYPI
        } else {
            PYPI
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn repository(&self) -> Option<&'static str> {
        self.repository
    }

    /// The `pip install` line printed after a successful release.
    #[must_use]
    pub fn install_instruction(&self, package: &str) -> String {
        match self.simple_index {
            Some(index) => format!("pip install --index-url {index} {package}"),
            None => format!("pip install {package}"),
        }
    }
}

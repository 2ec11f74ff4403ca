// Package version metadata, split into components at compile time by Cargo.
use serde_json::{Value, json};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModuleVersion {
    pub name: &'static str,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<&'static str>,
}

impl ModuleVersion {
    pub fn is_snapshot(&self) -> bool {
        self.pre.is_some()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "version": env!("CARGO_PKG_VERSION"),
            "major": self.major,
            "minor": self.minor,
            "patch": self.patch,
            "pre": self.pre,
        })
    }
}

pub fn module_version() -> ModuleVersion {
    let pre = env!("CARGO_PKG_VERSION_PRE");
    ModuleVersion {
        name: env!("CARGO_PKG_NAME"),
        major: component(env!("CARGO_PKG_VERSION_MAJOR")),
        minor: component(env!("CARGO_PKG_VERSION_MINOR")),
        patch: component(env!("CARGO_PKG_VERSION_PATCH")),
        pre: if pre.is_empty() { None } else { Some(pre) },
    }
}

fn component(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::module_version;

    #[test]
    fn components_match_package_version() {
        let version = module_version();
        let rendered = format!("{}.{}.{}", version.major, version.minor, version.patch);
        assert!(env!("CARGO_PKG_VERSION").starts_with(&rendered));
        assert_eq!(version.name, "omittable");
        assert_eq!(version.is_snapshot(), env!("CARGO_PKG_VERSION").contains('-'));
    }
}

//! Simple, general-purpose, hierarchical configuration.
//!
//! Configuration *value*s are generally referred to using a *path* of *name*s
//! (slice of strings), each of which walks a level down the hierarchy of
//! *section*s.  For example, `&["db", "postgres", "host"]`.
//!
//! Configuration paths are case-insensitive.
//!
//! A [`Config`] implementation may or may not allow a value and a section to
//! exist at the same path.
//!
//! All configuration values are strings.

pub mod parse;
pub mod validate;

pub trait ValueParser<T>: std::fmt::Debug {
    fn parse(&self, value: &str) -> Result<T, String>;
}

pub trait ValueValidator<T>: std::fmt::Debug {
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Everything needed to read a configuration value.
#[derive(Clone, Debug)]
pub struct ValueRef<'a, T> {
    /// Path to read the value from.
    pub names: &'a [&'a str],
    /// Default to use when there is no value at the path.
    pub def: &'a str,
    pub type_: &'a dyn ValueParser<T>,
    pub validators: &'a [&'a dyn ValueValidator<T>],
}

impl<T> ValueRef<'_, T> {
    /// Dotted form of the path, for messages.
    pub fn path(&self) -> String {
        self.names.join(".")
    }
}

/// Read configuration values.
pub trait Config {
    /// Find the value at the path given by `names`, if there is one.
    fn find<'s>(&'s self, names: &[&str]) -> Option<&'s str>;

    /// Get the value at the path given by `names`, or the default `def`.
    fn get<'s>(&'s self, names: &[&str], def: &'s str) -> &'s str {
        self.find(names).unwrap_or(def)
    }
}

/// Get a value using a [reference](ValueRef).
pub fn get_ref<C, T>(config: &C, vref: &ValueRef<T>) -> Result<T, String>
where
    C: Config + ?Sized,
{
    let raw = config.get(vref.names, vref.def);
    let parsed = vref.type_.parse(raw)
        .map_err(|e| format!("invalid config value ({}): {e}", vref.path()))?;
    for val in vref.validators {
        val.validate(&parsed)
            .map_err(|e| format!("invalid config value ({}): {e}",
                                 vref.path()))?;
    }
    Ok(parsed)
}

/// Implementation of [`Config`] using an in-memory map.
///
/// A value and a section may not exist at the same path.
///
/// When multiple values have equivalent paths (because paths are
/// case-insensitive), reading the value at the path will always return the same
/// value, but there is no defined scheme for how this value is chosen.
pub mod map {
    use std::collections::HashMap;

    /// A value or a section.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Entry {
        Value(String),
        Section(HashMap<String, Entry>),
    }

    impl Entry {
        fn find<'s>(&'s self, names: &[&str]) -> Option<&'s str> {
            match names.split_first() {
                Some((first_name, other_names)) => match self {
                    Entry::Value(_) => None,
                    Entry::Section(section) => section
                        .get(&first_name.to_ascii_lowercase())
                        .and_then(|entry| entry.find(other_names)),
                },
                None => match self {
                    Entry::Value(value) => Some(value),
                    Entry::Section(_) => None,
                },
            }
        }
    }

    /// Implementation of [`Config`](super::Config) using an in-memory map.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Config {
        cfg: Entry,
    }

    impl super::Config for Config {
        fn find<'s>(&'s self, names: &[&str]) -> Option<&'s str> {
            self.cfg.find(names)
        }
    }

    /// Copy an entry and lowercase its keys.
    fn normalise(entry: &Entry) -> Entry {
        match entry {
            Entry::Value(v) => Entry::Value(v.to_owned()),
            Entry::Section(m) => {
                let m: HashMap<String, Entry> = m.iter()
                    .map(|(k, v)| (k.to_lowercase(), normalise(v)))
                    .collect();
                Entry::Section(m)
            }
        }
    }

    /// Construct a config from a hierarchical map.
    pub fn new(cfg: HashMap<String, Entry>) -> Config {
        Config { cfg: normalise(&Entry::Section(cfg)) }
    }

    /// Construct a config from `(path, value)` pairs, where each path is
    /// dot-separated.
    pub fn from_pairs<'a, I>(pairs: I) -> Config
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut root = HashMap::<String, Entry>::new();
        for (path, value) in pairs {
            let names: Vec<&str> = path.split('.').collect();
            insert(&mut root, &names, value);
        }
        new(root)
    }

    fn insert(
        section: &mut HashMap<String, Entry>,
        names: &[&str],
        value: &str,
    ) {
        match names {
            [] => {}
            [name] => {
                section.insert(name.to_string(),
                               Entry::Value(value.to_owned()));
            }
            [name, rest @ ..] => {
                let entry = section.entry(name.to_string())
                    .or_insert_with(|| Entry::Section(HashMap::new()));
                if let Entry::Value(_) = entry {
                    *entry = Entry::Section(HashMap::new());
                }
                if let Entry::Section(child) = entry {
                    insert(child, rest, value);
                }
            }
        }
    }
}

/// Implementation of [`Config`] using the process's environment variables.
///
/// - The configuration values become fixed at the time of construction.
/// - If reading an environment variable fails, it is ignored.
/// - Path names are separated using `_` characters.
/// - Only uppercase environment variables are included.
/// - A value and a section may exist at the same path.
/// - When reading a value, `-` characters in path names will match `_`
///   characters in environment variable names.
pub mod env {
    use std::collections::HashMap;

    /// Implementation of [`Config`](super::Config) using the process's
    /// environment variables.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Config {
        prefix: String,
        env: HashMap<String, String>,
    }

    impl super::Config for Config {
        fn find<'s>(&'s self, names: &[&str]) -> Option<&'s str> {
            let mapped_names: Vec<String> = names.iter().map(|name| {
                name.to_ascii_uppercase().replace('-', "_")
            }).collect();
            let env_name = self.prefix.to_owned() + &mapped_names.join("_");
            self.env.get(&env_name).map(|v| v.as_str())
        }
    }

    /// Construct a config from the current process environment.
    ///
    /// Only environment variables starting with `prefix` are included, and
    /// `prefix` is removed when reading values.
    pub fn new(prefix: &str) -> Config {
        let vars = std::env::vars_os()
            .filter_map(|(name_os, val_os)| {
                match (name_os.into_string(), val_os.into_string()) {
                    (Ok(name), Ok(val)) => Some((name, val)),
                    _ => None,
                }
            });
        from_vars(prefix, vars)
    }

    /// Construct a config from the given variables instead of the process
    /// environment.
    pub fn from_vars<I>(prefix: &str, vars: I) -> Config
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = vars.into_iter()
            .filter(|(name, _)| {
                name.starts_with(prefix) && *name == name.to_ascii_uppercase()
            })
            .collect();
        Config { prefix: prefix.to_owned(), env }
    }
}

/// Implementation of [`Config`] using a YAML file.
///
/// A value and a section may not exist at the same path.
///
/// When multiple values have equivalent paths (because paths are
/// case-insensitive), the last matching value in the file is returned.
pub mod file {
    use std::{fs::File, path::Path};
    use super::map::{self, Entry};
    use serde_yaml::Value;

    fn parse(value: &Value) -> Entry {
        match value {
            Value::Null => Entry::Value("".to_owned()),
            Value::Bool(b) => Entry::Value(b.to_string()),
            Value::Number(n) => Entry::Value(n.to_string()),
            Value::String(s) => Entry::Value(s.to_owned()),
            Value::Sequence(s) => {
                Entry::Section(s.iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), parse(v)))
                    .collect())
            }
            Value::Mapping(m) => {
                Entry::Section(m.iter()
                    .flat_map(|(k, v)| {
                        k.as_str()
                            .map(|k_str| (k_str.to_owned(), parse(v)))
                    })
                    .collect())
            }
            Value::Tagged(_) => Entry::Value("".to_owned())
        }
    }

    /// Construct a config from YAML text.
    pub fn from_str(text: &str) -> Result<map::Config, String> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| format!("error parsing config: {e}"))?;
        from_value(&value)
    }

    fn from_value(value: &Value) -> Result<map::Config, String> {
        if let Entry::Section(e) = parse(value) {
            Ok(map::new(e))
        } else {
            Err("invalid config file: top-level must be a map".to_owned())
        }
    }

    /// Construct a config from a YAML file.
    pub fn new<P>(path: P) -> Result<map::Config, String>
    where
        P: AsRef<Path> + core::fmt::Debug
    {
        let file = File::open(path.as_ref())
            .map_err(|e| format!("error opening file ({path:?}): {e}"))?;
        let value: Value = serde_yaml::from_reader(file)
            .map_err(|e| format!(
                "error loading config from file ({path:?}): {e}"))?;
        from_value(&value)
    }
}

/// Implementation of [`Config`] that reads through a list of other configs.
///
/// The first layer holding a value at a path wins.
pub mod layered {
    pub struct Config {
        layers: Vec<Box<dyn super::Config>>,
    }

    impl super::Config for Config {
        fn find<'s>(&'s self, names: &[&str]) -> Option<&'s str> {
            self.layers.iter().find_map(|layer| layer.find(names))
        }
    }

    /// Construct a config from layers, highest priority first.
    pub fn new(layers: Vec<Box<dyn super::Config>>) -> Config {
        Config { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::{get_ref, parse, validate, Config, ValueRef};
    use super::{env, file, layered, map};

    const PORT: ValueRef<'static, u16> = ValueRef {
        names: &["db", "postgres", "port"],
        def: "5432",
        type_: &parse::PORT,
        validators: &[],
    };

    const NAME: ValueRef<'static, String> = ValueRef {
        names: &["db", "postgres", "name"],
        def: "kobo",
        type_: &parse::STRING,
        validators: &[validate::NON_EMPTY, validate::SQL_IDENTIFIER],
    };

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn map_paths_are_case_insensitive() {
        let cfg = map::from_pairs([("DB.Postgres.Host", "db.internal")]);
        assert_eq!(cfg.find(&["db", "POSTGRES", "host"]), Some("db.internal"));
        assert_eq!(cfg.find(&["db", "postgres"]), None);
        assert_eq!(cfg.get(&["db", "missing"], "fallback"), "fallback");
    }

    #[test]
    fn env_maps_dashes_and_prefix() {
        let cfg = env::from_vars("KOBO_", vars(&[
            ("KOBO_DB_POSTGRES_MAINTENANCE_DB", "template1"),
            ("OTHER_DB_POSTGRES_HOST", "ignored"),
            ("KOBO_db_lowercase", "ignored"),
        ]));
        assert_eq!(cfg.find(&["db", "postgres", "maintenance-db"]),
                   Some("template1"));
        assert_eq!(cfg.find(&["db", "postgres", "host"]), None);
        assert_eq!(cfg.find(&["db", "lowercase"]), None);
    }

    #[test]
    fn yaml_scalars_become_strings() {
        let cfg = file::from_str("
db:
  postgres:
    port: 6543
    host: example.org
admin:
  pin: '0042'
").unwrap();
        assert_eq!(get_ref(&cfg, &PORT).unwrap(), 6543);
        assert_eq!(cfg.find(&["db", "postgres", "host"]), Some("example.org"));
        assert_eq!(cfg.find(&["admin", "pin"]), Some("0042"));
    }

    #[test]
    fn yaml_top_level_must_be_map() {
        assert!(file::from_str("- a\n- b\n").is_err());
    }

    #[test]
    fn yaml_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kobodb.yaml");
        std::fs::write(&path, "db:\n  backend: sqlite\n").unwrap();
        let cfg = file::new(&path).unwrap();
        assert_eq!(cfg.find(&["db", "backend"]), Some("sqlite"));
        assert!(file::new(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn first_layer_wins() {
        let cfg = layered::new(vec![
            Box::new(env::from_vars("KOBO_", vars(&[
                ("KOBO_DB_POSTGRES_PORT", "7000"),
            ]))),
            Box::new(map::from_pairs([
                ("db.postgres.port", "6000"),
                ("db.postgres.name", "shop"),
            ])),
        ]);
        assert_eq!(get_ref(&cfg, &PORT).unwrap(), 7000);
        assert_eq!(get_ref(&cfg, &NAME).unwrap(), "shop");
    }

    #[test]
    fn defaults_apply_when_no_layer_has_value() {
        let cfg = layered::new(vec![]);
        assert_eq!(get_ref(&cfg, &PORT).unwrap(), 5432);
        assert_eq!(get_ref(&cfg, &NAME).unwrap(), "kobo");
    }

    #[test]
    fn invalid_values_name_their_path() {
        let cfg = map::from_pairs([
            ("db.postgres.port", "99999"),
            ("db.postgres.name", "kobo; DROP TABLE users"),
        ]);
        let err = get_ref(&cfg, &PORT).unwrap_err();
        assert!(err.contains("db.postgres.port"), "{err}");
        assert!(get_ref(&cfg, &NAME).is_err());
    }
}

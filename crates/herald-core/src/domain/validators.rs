//! The validator engine: raw string in, typed value or reason out.
//!
//! A [`Validator`] is a stateless, total function over raw strings. Built-ins
//! cover the common CLI vocabulary (email, numbers, ranges, files, URLs,
//! UUIDs, JSON, ports, choices); a custom validator is any type implementing
//! the same trait — or a plain closure via [`custom`] — so user-declared
//! types integrate identically to built-ins.
//!
//! Validators never mutate external state. The existence checks inside
//! [`FileValidator`], [`PathValidator`] and [`DirectoryValidator`] are the
//! sole sanctioned I/O, and they are idempotent.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use regex::Regex;

// ── Typed values ──────────────────────────────────────────────────────────────

/// The typed result of a successful validation.
///
/// Handlers only ever see these — never raw strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(uuid::Uuid),
    Json(serde_json::Value),
    Path(PathBuf),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<uuid::Uuid> {
        match self {
            Self::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Json(v) => write!(f, "{v}"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl PartialEq<&str> for ArgValue {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Str(s) if s == other)
    }
}

// ── The validator contract ────────────────────────────────────────────────────

/// A pure function from a raw argument string to a typed value or a
/// human-readable rejection reason.
///
/// Validators are shared by reference (`Arc<dyn Validator>`) across every
/// argument spec that uses them; they hold no per-invocation state.
pub trait Validator: Send + Sync {
    /// Validate a raw string. `Err` carries the reason shown to the user.
    fn validate(&self, raw: &str) -> Result<ArgValue, String>;

    /// Human-readable type name used in help text.
    fn type_name(&self) -> &str;
}

impl fmt::Debug for dyn Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.type_name())
    }
}

/// Wrap a plain closure as a [`Validator`].
///
/// This is the escape hatch for app-defined types:
///
/// ```rust
/// use herald_core::domain::validators::{custom, ArgValue, Validator};
///
/// let even = custom("even", |raw| {
///     raw.parse::<i64>()
///         .map_err(|_| "not numeric".to_string())
///         .and_then(|n| {
///             if n % 2 == 0 {
///                 Ok(ArgValue::Int(n))
///             } else {
///                 Err("must be even".to_string())
///             }
///         })
/// });
/// assert!(even.validate("4").is_ok());
/// assert!(even.validate("5").is_err());
/// ```
pub fn custom<F>(type_name: &'static str, f: F) -> Arc<dyn Validator>
where
    F: Fn(&str) -> Result<ArgValue, String> + Send + Sync + 'static,
{
    Arc::new(FnValidator { type_name, f })
}

struct FnValidator<F> {
    type_name: &'static str,
    f: F,
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&str) -> Result<ArgValue, String> + Send + Sync,
{
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        (self.f)(raw)
    }

    fn type_name(&self) -> &str {
        self.type_name
    }
}

// ── Built-in validators ───────────────────────────────────────────────────────

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // local-part "@" domain, domain must contain at least one dot
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Accepts `local@domain.tld`; the domain must contain at least one `.`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        if EMAIL_PATTERN.is_match(raw) {
            Ok(ArgValue::Str(raw.to_string()))
        } else {
            Err("invalid email format".into())
        }
    }

    fn type_name(&self) -> &str {
        "email"
    }
}

/// A path that must exist on the filesystem and carry a specific extension.
///
/// The two failure branches produce distinct reasons ("not found" vs
/// "wrong extension") so callers and tests can tell which check tripped.
#[derive(Debug, Clone)]
pub struct FileValidator {
    /// Expected extension without the leading dot, lowercase.
    extension: String,
}

impl FileValidator {
    pub fn new(extension: impl AsRef<str>) -> Self {
        Self {
            extension: extension.as_ref().trim_start_matches('.').to_lowercase(),
        }
    }
}

impl Validator for FileValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let path = PathBuf::from(raw);
        if !path.is_file() {
            return Err(format!("'{raw}': file not found"));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if ext != self.extension {
            return Err(format!(
                "'{raw}': wrong extension (expected '.{}')",
                self.extension
            ));
        }
        Ok(ArgValue::Path(path))
    }

    fn type_name(&self) -> &str {
        "file"
    }
}

/// An integer constrained to an inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
    min: i64,
    max: i64,
}

impl RangeValidator {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Validator for RangeValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let value: i64 = raw.trim().parse().map_err(|_| "not numeric".to_string())?;
        if value < self.min || value > self.max {
            return Err(format!("out of range [{},{}]", self.min, self.max));
        }
        Ok(ArgValue::Int(value))
    }

    fn type_name(&self) -> &str {
        "range"
    }
}

/// Any integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntValidator;

impl Validator for IntValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        raw.trim()
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| format!("'{raw}' is not a valid integer"))
    }

    fn type_name(&self) -> &str {
        "int"
    }
}

/// Any floating-point number.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatValidator;

impl Validator for FloatValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        raw.trim()
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| format!("'{raw}' is not a valid number"))
    }

    fn type_name(&self) -> &str {
        "float"
    }
}

/// The identity validator: any string passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrValidator;

impl Validator for StrValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        Ok(ArgValue::Str(raw.to_string()))
    }

    fn type_name(&self) -> &str {
        "str"
    }
}

/// An RFC 4122 UUID in any of the formats `uuid::Uuid` parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidValidator;

impl Validator for UuidValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        uuid::Uuid::parse_str(raw.trim())
            .map(ArgValue::Uuid)
            .map_err(|_| format!("'{raw}' is not a valid UUID"))
    }

    fn type_name(&self) -> &str {
        "uuid"
    }
}

/// A URL that must start with `http://` or `https://`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(ArgValue::Str(raw.to_string()))
        } else {
            Err(format!(
                "'{raw}' is not a valid URL (must start with http:// or https://)"
            ))
        }
    }

    fn type_name(&self) -> &str {
        "url"
    }
}

/// Inline JSON, or a path to a JSON file.
///
/// If the raw value names an existing file it is read and parsed; otherwise
/// the raw value itself is parsed as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValidator;

impl Validator for JsonValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let path = PathBuf::from(raw);
        if path.is_file() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("unable to read JSON file '{raw}': {e}"))?;
            return serde_json::from_str(&content)
                .map(ArgValue::Json)
                .map_err(|e| format!("unable to parse JSON file '{raw}': {e}"));
        }
        serde_json::from_str(raw)
            .map(ArgValue::Json)
            .map_err(|e| format!("unable to parse JSON value: {e}"))
    }

    fn type_name(&self) -> &str {
        "json"
    }
}

/// A TCP port number within `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct PortValidator {
    min: u16,
    max: u16,
}

impl PortValidator {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }
}

impl Default for PortValidator {
    fn default() -> Self {
        Self { min: 1, max: 65535 }
    }
}

impl Validator for PortValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let port: u16 = raw
            .trim()
            .parse()
            .map_err(|_| format!("'{raw}' is not a valid port number"))?;
        if port < self.min || port > self.max {
            return Err(format!(
                "port must be between {} and {}",
                self.min, self.max
            ));
        }
        Ok(ArgValue::Int(i64::from(port)))
    }

    fn type_name(&self) -> &str {
        "port"
    }
}

/// One of a fixed set of accepted strings, case-insensitive by default.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    options: Vec<String>,
    case_sensitive: bool,
}

impl ChoiceValidator {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let matched = self.options.iter().find(|opt| {
            if self.case_sensitive {
                opt.as_str() == raw
            } else {
                opt.eq_ignore_ascii_case(raw)
            }
        });
        match matched {
            // Canonicalize to the declared spelling.
            Some(opt) => Ok(ArgValue::Str(opt.clone())),
            None => Err(format!("must be one of: {}", self.options.join(", "))),
        }
    }

    fn type_name(&self) -> &str {
        "choice"
    }
}

/// A file or directory path that must exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathValidator;

impl Validator for PathValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let path = PathBuf::from(raw);
        if path.exists() {
            Ok(ArgValue::Path(path))
        } else {
            Err(format!("'{raw}': path does not exist"))
        }
    }

    fn type_name(&self) -> &str {
        "path"
    }
}

/// A directory path that must exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryValidator;

impl Validator for DirectoryValidator {
    fn validate(&self, raw: &str) -> Result<ArgValue, String> {
        let path = PathBuf::from(raw);
        if !path.exists() {
            return Err(format!("'{raw}': path does not exist"));
        }
        if !path.is_dir() {
            return Err(format!("'{raw}' is not a directory"));
        }
        Ok(ArgValue::Path(path))
    }

    fn type_name(&self) -> &str {
        "directory"
    }
}

// ── Shared instances and factories ────────────────────────────────────────────

/// Email validator, shared.
pub fn email() -> Arc<dyn Validator> {
    Arc::new(EmailValidator)
}

/// Existing file with the given extension (leading dot optional).
pub fn file(extension: impl AsRef<str>) -> Arc<dyn Validator> {
    Arc::new(FileValidator::new(extension))
}

/// Integer within the inclusive range `[min, max]`.
pub fn range(min: i64, max: i64) -> Arc<dyn Validator> {
    Arc::new(RangeValidator::new(min, max))
}

pub fn integer() -> Arc<dyn Validator> {
    Arc::new(IntValidator)
}

pub fn float() -> Arc<dyn Validator> {
    Arc::new(FloatValidator)
}

pub fn string() -> Arc<dyn Validator> {
    Arc::new(StrValidator)
}

pub fn uuid() -> Arc<dyn Validator> {
    Arc::new(UuidValidator)
}

pub fn url() -> Arc<dyn Validator> {
    Arc::new(UrlValidator)
}

pub fn json() -> Arc<dyn Validator> {
    Arc::new(JsonValidator)
}

/// Port with the default `[1, 65535]` bounds.
pub fn port() -> Arc<dyn Validator> {
    Arc::new(PortValidator::default())
}

pub fn port_between(min: u16, max: u16) -> Arc<dyn Validator> {
    Arc::new(PortValidator::new(min, max))
}

pub fn choice<I, S>(options: I) -> Arc<dyn Validator>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(ChoiceValidator::new(options))
}

pub fn path() -> Arc<dyn Validator> {
    Arc::new(PathValidator)
}

pub fn directory() -> Arc<dyn Validator> {
    Arc::new(DirectoryValidator)
}

/// Resolve a short type alias to a shared validator instance.
///
/// Keeps declarations ergonomic: an app can say `"email"` instead of
/// constructing the validator itself. Unknown aliases return `None` so
/// callers can fall back or error.
pub fn by_alias(alias: &str) -> Option<Arc<dyn Validator>> {
    match alias.trim().to_lowercase().as_str() {
        "email" => Some(email()),
        "int" => Some(integer()),
        "float" => Some(float()),
        "str" | "string" => Some(string()),
        "path" | "filepath" => Some(path()),
        "dir" | "directory" => Some(directory()),
        "uuid" => Some(uuid()),
        "url" => Some(url()),
        "json" => Some(json()),
        "port" => Some(port()),
        _ => None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

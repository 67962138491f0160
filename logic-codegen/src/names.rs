use indexmap::IndexSet;

/// Lower camel case of an arbitrary name: `"Primary Button"` gives
/// `"primaryButton"`.
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Upper camel case, for type names.
pub fn pascal_case(s: &str) -> String {
    let camel = camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}

/// The camel-cased key of a qualified declaration path.
pub fn path_key<S: AsRef<str>>(path: &[S]) -> String {
    let joined: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    camel_case(&joined.join(" "))
}

/// Hands out unique names in first-come order: `view`, `view1`, `view2`...
#[derive(Debug, Default)]
pub struct NameGenerator {
    used: IndexSet<String>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn name(&mut self, base: &str) -> String {
        let mut base = camel_case(base);
        if base.is_empty() {
            base.push_str("layer");
        }
        let mut candidate = base.clone();
        let mut n = 1;
        while self.used.contains(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

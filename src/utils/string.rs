const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

const F_TO_VES: &[(&str, &str)] = &[
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("shelf", "shelves"),
    ("wife", "wives"),
    ("wolf", "wolves"),
];

/// English plural of a lowercase word.
///
/// Covers the regular suffix rules plus a short table of irregular and
/// uncountable nouns. Only the last `_`-separated segment is inflected, so
/// `geo_uri_scheme` becomes `geo_uri_schemes`.
pub fn pluralize(word: &str) -> String {
    let (prefix, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };

    if last.is_empty() || UNCOUNTABLE.contains(&last) {
        return word.to_string();
    }

    for table in [IRREGULAR, F_TO_VES] {
        for (singular, plural) in table {
            if let Some(stem) = last.strip_suffix(singular) {
                // "human" must not become "humen"
                if stem.is_empty() || (*singular != "man" && *singular != "ox") {
                    return format!("{prefix}{stem}{plural}");
                }
            }
        }
    }

    let plural = if last.ends_with("ss")
        || last.ends_with("sh")
        || last.ends_with("ch")
        || last.ends_with('x')
        || last.ends_with('z')
        || last.ends_with('s')
    {
        format!("{last}es")
    } else if let Some(stem) = last.strip_suffix('y') {
        match stem.chars().last() {
            Some(c) if !"aeiou".contains(c) => format!("{stem}ies"),
            _ => format!("{last}s"),
        }
    } else {
        format!("{last}s")
    };

    format!("{prefix}{plural}")
}

/// Collection name for a model class: the lowercased class name, pluralized.
pub fn collection_name(class: &str) -> String {
    pluralize(&class.to_lowercase())
}

//! English pluralization for output keys.
//!
//! Bucket lists are stored under the plural of their aggregation name
//! (`name[...]` becomes `names`), and each bucket's own key field uses the
//! singular (`terms:names` yields records keyed by `name`).
//!
//! Names are usually camelCase or snake_case; only the last word is
//! inflected, so `salesTotal` becomes `salesTotals` and `sales_person`
//! becomes `sales_people`.

use std::sync::LazyLock;

use regex::Regex;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "moose",
    "deer",
    "news",
    "police",
    "traffic",
    "metadata",
];

/// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("criterion", "criteria"),
];

// Checked in order; the first matching rule wins.
static PLURAL_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"(quiz)$", "${1}zes"),
        (r"(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(x|ch|ss|sh)$", "${1}es"),
        (r"([^aeiouy]|qu)y$", "${1}ies"),
        (r"(hive)$", "${1}s"),
        (r"(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(ax|test)is$", "${1}es"),
        (r"sis$", "ses"),
        (r"([ti])a$", "${1}a"),
        (r"([ti])um$", "${1}a"),
        (r"(buffal|tomat|potat)o$", "${1}oes"),
        (r"(bu)s$", "${1}ses"),
        (r"(alias|status)$", "${1}es"),
        (r"(octop|vir)(?:us|i)$", "${1}i"),
        (r"s$", "s"),
        (r"$", "s"),
    ])
});

static SINGULAR_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"(database)s$", "${1}"),
        (r"(quiz)zes$", "${1}"),
        (r"(matr)ices$", "${1}ix"),
        (r"(vert|ind)ices$", "${1}ex"),
        (r"(alias|status)(?:es)?$", "${1}"),
        (r"(octop|vir)(?:us|i)$", "${1}us"),
        (r"^(a)x[ie]s$", "${1}xis"),
        (r"(cris|test)(?:is|es)$", "${1}is"),
        (r"(shoe)s$", "${1}"),
        (r"(bus)(?:es)?$", "${1}"),
        (r"(o)es$", "${1}"),
        (r"(x|ch|ss|sh)es$", "${1}"),
        (r"(m)ovies$", "${1}ovie"),
        (r"([^aeiouy]|qu)ies$", "${1}y"),
        (r"([lr])ves$", "${1}f"),
        (r"(tive|hive)s$", "${1}"),
        (r"([^f])ves$", "${1}fe"),
        (r"(analy|ba|diagno|parenthe|progno|synop|the)(?:sis|ses)$", "${1}sis"),
        (r"([ti])a$", "${1}um"),
        (r"(ss)$", "${1}"),
        (r"s$", ""),
    ])
});

fn compile(table: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    table
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("valid inflection rule");
            (re, *replacement)
        })
        .collect()
}

/// Byte offset where the last camelCase / snake_case / kebab-case word starts.
fn last_word_start(word: &str) -> usize {
    let mut start = 0;
    let mut prev = None;

    for (idx, ch) in word.char_indices() {
        match prev {
            Some('_') | Some('-') => start = idx,
            Some(p) if ch.is_uppercase() && !p.is_uppercase() => start = idx,
            _ => {}
        }
        prev = Some(ch);
    }
    start
}

/// Copies the case of `template`'s first letter onto `word`.
fn match_case(template: &str, word: &str) -> String {
    let mut chars = word.chars();
    match (template.chars().next(), chars.next()) {
        (Some(t), Some(first)) if t.is_uppercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => word.to_string(),
    }
}

fn inflect(
    word: &str,
    rules: &[(Regex, &'static str)],
    irregular: impl Fn(&str) -> Option<&'static str>,
) -> String {
    let start = last_word_start(word);
    let (head, last) = word.split_at(start);
    let lower = last.to_lowercase();

    if last.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some(replacement) = irregular(&lower) {
        return format!("{head}{}", match_case(last, replacement));
    }

    rules
        .iter()
        .find(|(re, _)| re.is_match(last))
        .map(|(re, replacement)| format!("{head}{}", re.replace(last, *replacement)))
        .unwrap_or_else(|| word.to_string())
}

/// Plural form of `word`. Words that are already plural are returned as-is.
pub fn pluralize(word: &str) -> String {
    inflect(word, &PLURAL_RULES, |lower| {
        IRREGULAR.iter().find_map(|(singular, plural)| {
            if lower == *singular || lower == *plural {
                Some(*plural)
            } else {
                None
            }
        })
    })
}

/// Singular form of `word`. Words without a plural ending are returned as-is.
pub fn singularize(word: &str) -> String {
    inflect(word, &SINGULAR_RULES, |lower| {
        IRREGULAR.iter().find_map(|(singular, plural)| {
            if lower == *singular || lower == *plural {
                Some(*singular)
            } else {
                None
            }
        })
    })
}

//! Every locale defines the same messages with the same `{ $placeholders }`,
//! and every `t!` call in the sources names a message that exists with the
//! arguments it passes.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const EN_US: &str = include_str!("../i18n/en-US/oncovision-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/oncovision-ui.ftl");

type Catalog = BTreeMap<String, BTreeSet<String>>;

/// Message id to the variables its value references. Panics on duplicates.
fn catalog(locale: &str, src: &str) -> Catalog {
    let mut out = Catalog::new();
    for (n, line) in src.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') || line.starts_with(char::is_whitespace) {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim().to_string();
        assert!(
            !value.trim().is_empty(),
            "{locale}:{} `{id}` has an empty value",
            n + 1
        );
        let previous = out.insert(id.clone(), variables(value));
        assert!(previous.is_none(), "{locale}:{} `{id}` defined twice", n + 1);
    }
    out
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// `(message id, argument names)` for each `t!("...")` call in `src`.
fn translation_calls(src: &str) -> Vec<(String, BTreeSet<String>)> {
    const OPEN: &str = "t!(\"";
    let mut calls = Vec::new();
    for (at, _) in src.match_indices(OPEN) {
        // `format!("` and friends end in the same characters.
        let word_start = src[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric() && c != '_');
        if !word_start {
            continue;
        }
        let chunk = &src[at + OPEN.len()..];
        let Some((id, rest)) = chunk.split_once('"') else {
            continue;
        };
        let args_src = rest.split(')').next().unwrap_or("");
        let args = args_src
            .split(',')
            .filter_map(|part| part.split_once('='))
            .map(|(name, _)| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        calls.push((id.to_string(), args));
    }
    calls
}

#[test]
fn locales_define_the_same_messages() {
    let en = catalog("en-US", EN_US);
    let es = catalog("es-ES", ES_ES);
    assert!(!en.is_empty());

    let en_ids: BTreeSet<_> = en.keys().collect();
    let es_ids: BTreeSet<_> = es.keys().collect();
    let missing: Vec<_> = en_ids.difference(&es_ids).collect();
    let extra: Vec<_> = es_ids.difference(&en_ids).collect();
    assert!(missing.is_empty(), "es-ES is missing {missing:?}");
    assert!(extra.is_empty(), "es-ES defines unknown messages {extra:?}");
}

#[test]
fn placeholders_match_across_locales() {
    let en = catalog("en-US", EN_US);
    let es = catalog("es-ES", ES_ES);

    let mismatched: Vec<_> = en
        .iter()
        .filter(|(id, vars)| es.get(*id).is_some_and(|other| other != *vars))
        .map(|(id, _)| id.as_str())
        .collect();
    assert!(mismatched.is_empty(), "placeholder mismatch in {mismatched:?}");

    assert_eq!(en["workspace-scan-size"], BTreeSet::from(["size".to_string()]));
    assert_eq!(en["results-generated"], BTreeSet::from(["timestamp".to_string()]));
}

#[test]
fn every_translation_call_resolves() {
    let en = catalog("en-US", EN_US);
    let mut files = Vec::new();
    rust_sources(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    assert!(!files.is_empty());

    let mut problems = Vec::new();
    for file in files {
        let src = fs::read_to_string(&file).unwrap_or_default();
        for (id, args) in translation_calls(&src) {
            match en.get(&id) {
                None => problems.push(format!("{}: unknown message `{id}`", file.display())),
                Some(vars) if *vars != args => problems.push(format!(
                    "{}: `{id}` passes {args:?}, message uses {vars:?}",
                    file.display()
                )),
                Some(_) => {}
            }
        }
    }
    assert!(problems.is_empty(), "{}", problems.join("\n"));
}

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use super::source::CommentSyntax;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// A comment running to the end of the line.
    Single(String),
    /// A delimited comment, which may span lines.
    Multi(String, String),
    /// A character conventionally used to draw comment outlines.
    Border(char),
    /// A string literal delimiter. Comment openers inside strings are ignored.
    Quote(char),
    /// The delimiter of single character literals, like Rust's `'"'`. Unlike
    /// a quote it is only a literal when it closes right after one char or
    /// escape, so lifetimes are left alone.
    CharLiteral(char),
    /// The delimiter of regex literals, like JavaScript's `/"/g`.
    RegexLiteral(char),
}

fn from_single(s: &str) -> CommentStyle {
    CommentStyle::Single(s.into())
}

fn from_multi(prefix: &str, suffix: &str) -> CommentStyle {
    CommentStyle::Multi(prefix.into(), suffix.into())
}

fn from_border(border: char) -> CommentStyle {
    CommentStyle::Border(border)
}

fn from_quote(quote: char) -> CommentStyle {
    CommentStyle::Quote(quote)
}

fn from_char_literal(quote: char) -> CommentStyle {
    CommentStyle::CharLiteral(quote)
}

fn from_regex_literal(delimiter: char) -> CommentStyle {
    CommentStyle::RegexLiteral(delimiter)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SupportedLanguage {
    pub name: String,
    pub comment_styles: Vec<CommentStyle>,
    pub file_extensions: Vec<String>,
}

impl SupportedLanguage {
    pub fn as_comment_syntax(&self) -> CommentSyntax {
        CommentSyntax::from_comment_styles(self.comment_styles.clone())
    }
}

pub fn lang(name: &str, comment_styles: Vec<CommentStyle>, exts: Vec<&str>) -> SupportedLanguage {
    SupportedLanguage {
        name: name.into(),
        comment_styles,
        file_extensions: exts.into_iter().map(|ext| ext.into()).collect(),
    }
}

pub fn haskell_style() -> Vec<CommentStyle> {
    vec![
        from_single("--"),
        from_multi("{-", "-}"),
        from_border('|'),
        from_quote('"'),
    ]
}

pub fn hash_style() -> Vec<CommentStyle> {
    vec![from_single("#"), from_quote('"'), from_quote('\'')]
}

pub fn c_style() -> Vec<CommentStyle> {
    vec![
        from_single("//"),
        from_multi("/*", "*/"),
        from_border('*'),
        from_quote('"'),
        from_quote('\''),
    ]
}

/// Like C, but `'` also starts lifetimes and labels so it only delimits
/// char literals.
pub fn rust_style() -> Vec<CommentStyle> {
    vec![
        from_single("//"),
        from_multi("/*", "*/"),
        from_border('*'),
        from_quote('"'),
        from_char_literal('\''),
    ]
}

pub fn js_style() -> Vec<CommentStyle> {
    let mut c = c_style();
    c.push(from_quote('`'));
    c.push(from_regex_literal('/'));
    c
}

pub fn objc_style() -> Vec<CommentStyle> {
    let mut c = c_style();
    c.push(from_border('!'));
    c
}

pub fn swift_style() -> Vec<CommentStyle> {
    let mut objc = objc_style();
    objc.push(from_border(':'));
    objc
}

pub fn lisp_style() -> Vec<CommentStyle> {
    vec![from_single(";"), from_border(';'), from_quote('"')]
}

pub fn php_style() -> Vec<CommentStyle> {
    let mut c = c_style();
    c.push(from_single("#"));
    c
}

pub fn python_style() -> Vec<CommentStyle> {
    vec![
        from_single("#"),
        from_multi("\"\"\"", "\"\"\""),
        from_multi("'''", "'''"),
        from_quote('"'),
        from_quote('\''),
    ]
}

pub fn sql_style() -> Vec<CommentStyle> {
    vec![
        from_single("--"),
        from_multi("/*", "*/"),
        from_border('*'),
        from_quote('\''),
    ]
}

pub fn all_supported_langs() -> HashSet<SupportedLanguage> {
    vec![
        lang(
            "C, C++",
            c_style(),
            vec!["h", "c", "cpp", "cxx", "cc", "hpp", "hxx", "hh", "ino"],
        ),
        lang("C#", c_style(), vec!["cs"]),
        lang("Clojure", lisp_style(), vec!["clj", "cljs", "cljc", "edn"]),
        lang("Cmake", hash_style(), vec!["cmake"]),
        lang("CSS", vec![from_multi("/*", "*/"), from_border('*')], vec!["css"]),
        lang("Go", js_style(), vec!["go"]),
        lang("Groovy", c_style(), vec!["groovy"]),
        lang(
            "Haskell, Idris, Purescript, Elm",
            haskell_style(),
            vec!["hs", "purs", "elm", "idr"],
        ),
        lang("HTML", vec![from_multi("<!--", "-->")], vec!["html", "htm"]),
        lang("Java", c_style(), vec!["java"]),
        lang(
            "JavaScript",
            js_style(),
            vec!["js", "mjs", "cjs", "es6", "jsx"],
        ),
        lang("Kotlin", c_style(), vec!["kt", "kts"]),
        lang("Less", c_style(), vec!["less"]),
        lang("LISP", lisp_style(), vec!["lisp", "el"]),
        lang(
            "Lua",
            vec![
                from_single("--"),
                from_multi("--[[", "]]"),
                from_quote('"'),
                from_quote('\''),
            ],
            vec!["lua"],
        ),
        lang("Nix", vec![from_single("#"), from_multi("/*", "*/"), from_quote('"')], vec!["nix"]),
        lang("Objective-C", objc_style(), vec!["m", "mm"]),
        lang("Perl", hash_style(), vec!["pl", "pm", "t"]),
        lang("PHP", php_style(), vec!["php", "phtml"]),
        lang("Python", python_style(), vec!["py", "pyi"]),
        lang("R", hash_style(), vec!["r"]),
        lang(
            "Ruby",
            vec![
                from_single("#"),
                from_multi("=begin", "=end"),
                from_quote('"'),
                from_quote('\''),
            ],
            vec!["rb"],
        ),
        lang("Rust", rust_style(), vec!["rs"]),
        lang("Scala", c_style(), vec!["sc", "scala"]),
        lang("Scss", c_style(), vec!["scss"]),
        lang("Shell", hash_style(), vec!["sh", "bash", "zsh"]),
        lang("Sql", sql_style(), vec!["sql"]),
        lang("Swift", swift_style(), vec!["swift"]),
        lang("Terraform", hash_style(), vec!["tf"]),
        lang("TOML", hash_style(), vec!["toml"]),
        lang("Typescript", js_style(), vec!["ts", "tsx", "mts", "cts"]),
        lang("Vue component", js_style(), vec!["vue"]),
        lang("YAML", hash_style(), vec!["yaml", "yml"]),
    ]
    .into_iter()
    .collect()
}

pub fn language_map() -> HashMap<String, Vec<SupportedLanguage>> {
    let mut lang_map = HashMap::new();
    for language in all_supported_langs().into_iter() {
        for ext in language.file_extensions.iter() {
            let langs_by_ext = lang_map.entry(ext.clone()).or_insert(vec![]);
            langs_by_ext.push(language.clone());
        }
    }
    lang_map
}

static LANGUAGE_MAP: LazyLock<HashMap<String, Vec<SupportedLanguage>>> =
    LazyLock::new(language_map);

/// Find the language for a file extension, ignoring case.
pub fn language_for_extension(ext: &str) -> Option<SupportedLanguage> {
    // Extensions are unique in the table, but keep the pick stable if that
    // ever changes.
    LANGUAGE_MAP
        .get(&ext.to_lowercase())?
        .iter()
        .min_by(|a, b| a.name.cmp(&b.name))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_unique() {
        for (ext, langs) in language_map() {
            assert_eq!(langs.len(), 1, "{ext} maps to {langs:?}");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let rust = language_for_extension("RS").unwrap();
        assert_eq!(rust.name, "Rust");
        assert!(language_for_extension("xyz").is_none());
    }

    #[test]
    fn syntax_from_styles() {
        let syntax = language_for_extension("swift").unwrap().as_comment_syntax();
        assert_eq!(syntax.singles, vec!["//"]);
        assert_eq!(syntax.multis, vec![("/*".to_string(), "*/".to_string())]);
        assert_eq!(syntax.borders, vec!['*', '!', ':']);
        assert_eq!(syntax.quotes, vec!['"', '\'']);
    }
}

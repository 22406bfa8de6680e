use index_core::tokenizer::{token_count, tokenize};

fn words(text: &str) -> Vec<&str> {
    tokenize(text).collect()
}

#[test]
fn it_splits_on_non_word_runs() {
    assert_eq!(words("cat dog cat"), vec!["cat", "dog", "cat"]);
    assert_eq!(words("well-known, so-called...facts"), vec!["well", "known", "so", "called", "facts"]);
}

#[test]
fn it_keeps_case_digits_and_underscores() {
    assert_eq!(words("The U.S. in 1989: snake_case"), vec!["The", "U", "S", "in", "1989", "snake_case"]);
}

#[test]
fn it_handles_unicode_letters() {
    assert_eq!(words("café naïve Zürich"), vec!["café", "naïve", "Zürich"]);
}

#[test]
fn it_drops_empty_terms_at_boundaries() {
    assert_eq!(words("  leading"), vec!["leading"]);
    assert_eq!(words("trailing!!\n"), vec!["trailing"]);
    assert_eq!(words("\nBreaking News\n\n"), vec!["Breaking", "News"]);
    assert!(words("").is_empty());
    assert!(words(" -- \n ").is_empty());
    assert_eq!(token_count("... ,,, "), 0);
}

#[test]
fn it_is_restartable() {
    let text = "Same text, same terms; same order.";
    let first: Vec<&str> = tokenize(text).collect();
    let second: Vec<&str> = tokenize(text).collect();
    assert_eq!(first, second);
    assert_eq!(token_count(text), first.len());
}

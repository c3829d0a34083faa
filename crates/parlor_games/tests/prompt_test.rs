//! Prompt helpers over in-memory I/O.

use std::io::Cursor;

use parlor_games::Prompter;
use parlor_tictactoe::{Marker, MoveProvider};

type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

fn prompter(input: &str) -> TestPrompter {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn transcript(prompter: TestPrompter) -> String {
    String::from_utf8(prompter.into_parts().1).unwrap()
}

#[test]
fn test_choice_exact_and_prefix() {
    let options = ["humans", "computers", "random"];
    let mut p = prompter("RANDOM\nc\n");
    assert_eq!(p.choice(&options, "Choose who goes first:").unwrap(), "random");
    assert_eq!(p.choice(&options, "Choose who goes first:").unwrap(), "computers");
    assert!(transcript(p).contains("=> Choose who goes first: humans, computers, or random"));
}

#[test]
fn test_choice_ambiguous_prefix_asks_again() {
    let options = ["heads", "hearts", "tails"];
    let mut p = prompter("he\nhea\nhear\n");
    assert_eq!(p.choice(&options, "Pick").unwrap(), "hearts");
    let out = transcript(p);
    assert_eq!(out.matches("=> Do you mean heads or hearts?").count(), 2);
}

#[test]
fn test_choice_rejects_empty_and_unknown() {
    let options = ["1", "2"];
    let mut p = prompter("\n7\n2\n");
    assert_eq!(p.choice(&options, "Square:").unwrap(), "2");
    assert_eq!(transcript(p).matches("=> Sorry, invalid choice.").count(), 2);
}

#[test]
fn test_integers() {
    let mut p = prompter("abc\n-2\n0\n3\n");
    assert_eq!(p.positive_int("How many?").unwrap(), 0);
    assert_eq!(p.positive_int("How many?").unwrap(), 3);

    let mut p = prompter("0\n000\n04\n");
    assert_eq!(p.strict_positive_int("Size?").unwrap(), 4);
    assert_eq!(transcript(p).matches("=> Sorry, invalid input.").count(), 2);
}

#[test]
fn test_name_must_not_be_blank() {
    let mut p = prompter("   \n  Grace Hopper  \n");
    assert_eq!(p.name("Name?").unwrap(), "Grace Hopper");
}

#[test]
fn test_marker_rejects_taken_and_long() {
    let taken = [Marker::from_glyph('X')];
    let mut p = prompter("XY\nX\nQ\n");
    assert_eq!(p.marker("Marker?", &taken).unwrap(), Marker::from_glyph('Q'));
    let out = transcript(p);
    assert!(out.contains("=> Sorry, invalid input."));
    assert!(out.contains("=> Sorry, the marker is already taken"));
}

#[test]
fn test_prompter_provides_moves() {
    let options: Vec<String> = ["0", "4", "8"].iter().map(|s| s.to_string()).collect();
    let mut p = prompter("5\n8\n");
    assert_eq!(p.choose_cell(&options, "Ada (X), choose a square:").unwrap(), "8");

    let mut closed = prompter("");
    assert!(closed.choose_cell(&options, "Ada (X), choose a square:").is_err());
}

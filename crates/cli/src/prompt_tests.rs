// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Cursor;
use yare::parameterized;

fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
    Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn written(prompt: &Prompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(prompt.output().clone()).unwrap()
}

#[test]
fn test_ask_trims_answer_and_writes_question() {
    let mut prompt = prompt("  abc123 \n");

    assert_eq!(prompt.ask("PIN code: ").unwrap(), "abc123");
    assert_eq!(written(&prompt), "PIN code: ");
}

#[test]
fn test_ask_at_end_of_input_cancels() {
    let mut prompt = prompt("");
    assert!(matches!(prompt.ask("PIN code: "), Err(Error::Cancelled)));
}

#[test]
fn test_ask_required_repeats_on_blank() {
    let mut prompt = prompt("\n   \nvalue\n");

    assert_eq!(prompt.ask_required("Name: ").unwrap(), "value");
    assert_eq!(written(&prompt), "Name: Name: Name: ");
}

#[parameterized(
    lower_y = { "y\n", true },
    word_yes = { "Yes\n", true },
    no = { "n\n", false },
    blank = { "\n", false },
    other = { "sure\n", false },
    eof = { "", false },
)]
fn test_confirm(input: &str, expected: bool) {
    let mut prompt = prompt(input);
    assert_eq!(prompt.confirm("Delete 3 tickets?").unwrap(), expected);
}

#[test]
fn test_confirm_shows_default() {
    let mut prompt = prompt("\n");
    prompt.confirm("Proceed?").unwrap();
    assert_eq!(written(&prompt), "Proceed? [y/N] ");
}

#[test]
fn test_say_writes_line() {
    let mut prompt = prompt("");
    prompt.say("Logged in.").unwrap();
    assert_eq!(written(&prompt), "Logged in.\n");
}

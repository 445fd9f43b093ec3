// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::TestContext;
use tmv_core::MemoryRemote;

fn output(remote: &mut MemoryRemote) -> String {
    let mut out = Vec::new();
    run_impl(remote, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_spaces_listed_by_name_with_ids() {
    let mut ctx = TestContext::new();
    let alpha = ctx.remote.add_space("Alpha");

    let text = output(&mut ctx.remote);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("Alpha   {}", alpha.id));
    assert_eq!(lines[1], format!("dest    {}", ctx.dest.id));
    assert_eq!(lines[2], format!("source  {}", ctx.source.id));
}

#[test]
fn test_no_spaces() {
    let mut remote = MemoryRemote::new();
    assert_eq!(output(&mut remote), "No spaces found.\n");
}

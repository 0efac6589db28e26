//! What an anonymous visitor is allowed to see.

use std::collections::HashSet;

use crate::database::models::{Catelog, Tool};

/// Drops hidden tools and every tool whose catalog is hidden
pub fn filter_hidden_tools(tools: Vec<Tool>, catelogs: &[Catelog]) -> Vec<Tool> {
    let hidden: HashSet<&str> = catelogs
        .iter()
        .filter(|c| c.hide)
        .map(|c| c.name.as_str())
        .collect();

    tools
        .into_iter()
        .filter(|t| !t.hide && !hidden.contains(t.catelog.as_str()))
        .collect()
}

pub fn filter_hidden_catelogs(catelogs: Vec<Catelog>) -> Vec<Catelog> {
    catelogs.into_iter().filter(|c| !c.hide).collect()
}

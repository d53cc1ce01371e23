// src/dashboard/display.rs
//! Display surface
//!
//! The presenter only knows [`DisplaySurface`]: named text fields, a
//! progress bar, and labelled expandable sections. [`Board`] is the
//! in-memory implementation the CLI renders to the terminal.

use crate::types::{BarClass, Field};
use std::collections::BTreeMap;
use std::fmt;

/// Width of the rendered progress bar in cells
const BAR_CELLS: usize = 20;

/// Output locations the presenter writes into
pub trait DisplaySurface {
    /// Replaces the text of `field`
    fn set_text(&mut self, field: Field, text: &str);

    /// Sets the progress bar fill, e.g. `"42.5%"`
    fn set_bar_width(&mut self, width: &str);

    /// Sets the progress bar tier
    fn set_bar_class(&mut self, class: BarClass);

    /// Labels of the expandable sections, in order
    fn section_labels(&self) -> Vec<String>;

    /// Forces the section at `index` open
    fn open_section(&mut self, index: usize);
}

/// A labelled, collapsible group of fields
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Visible label
    pub label: String,
    /// Fields shown when the section is open
    pub fields: Vec<Field>,
    /// Whether the section shows its fields
    pub open: bool,
    /// Whether the progress bar is drawn at the end of this section
    pub shows_bar: bool,
}

impl Section {
    fn new(label: &str, fields: &[Field], open: bool) -> Self {
        Section {
            label: label.to_string(),
            fields: fields.to_vec(),
            open,
            shows_bar: false,
        }
    }
}

/// In-memory dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    texts: BTreeMap<Field, String>,
    bar_width: String,
    bar_class: Option<BarClass>,
    sections: Vec<Section>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board with the standard layout; "Shares" and "Odds" start collapsed
    pub fn new() -> Self {
        let mut shares = Section::new(
            "Shares",
            &[Field::Shares, Field::BestShare, Field::BestEver, Field::Percent],
            false,
        );
        shares.shows_bar = true;

        Board {
            texts: BTreeMap::new(),
            bar_width: "0%".to_string(),
            bar_class: None,
            sections: vec![
                Section::new(
                    "Worker",
                    &[Field::Worker, Field::LastShare, Field::NetworkDiff],
                    true,
                ),
                Section::new(
                    "Hashrates",
                    &[
                        Field::Hashrate1m,
                        Field::Hashrate5m,
                        Field::Hashrate1hr,
                        Field::Hashrate1d,
                        Field::Hashrate7d,
                    ],
                    true,
                ),
                shares,
                Section::new(
                    "Odds of Finding a Block",
                    &[
                        Field::OddsDayPercent,
                        Field::OddsDayChance,
                        Field::OddsWeekPercent,
                        Field::OddsWeekChance,
                        Field::OddsMonthPercent,
                        Field::OddsMonthChance,
                        Field::OddsYearPercent,
                        Field::OddsYearChance,
                    ],
                    false,
                ),
            ],
        }
    }

    /// Current text of `field`, if anything was written
    pub fn text(&self, field: Field) -> Option<&str> {
        self.texts.get(&field).map(String::as_str)
    }

    /// Current bar width
    pub fn bar_width(&self) -> &str {
        &self.bar_width
    }

    /// Current bar tier, if one was ever set
    pub fn bar_class(&self) -> Option<BarClass> {
        self.bar_class
    }

    /// Sections in display order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn filled_cells(&self) -> usize {
        let width = self
            .bar_width
            .trim_end_matches('%')
            .parse::<f64>()
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        ((width / 100.0) * BAR_CELLS as f64).round() as usize
    }
}

impl DisplaySurface for Board {
    fn set_text(&mut self, field: Field, text: &str) {
        self.texts.insert(field, text.to_string());
    }

    fn set_bar_width(&mut self, width: &str) {
        self.bar_width = width.to_string();
    }

    fn set_bar_class(&mut self, class: BarClass) {
        self.bar_class = Some(class);
    }

    fn section_labels(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.label.clone()).collect()
    }

    fn open_section(&mut self, index: usize) {
        if let Some(section) = self.sections.get_mut(index) {
            section.open = true;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            if !section.open {
                writeln!(f, "+ {}", section.label)?;
                continue;
            }
            writeln!(f, "- {}", section.label)?;
            for field in &section.fields {
                let text = self.text(*field).unwrap_or("–");
                writeln!(f, "    {:<20} {}", field.label(), text)?;
            }
            if section.shows_bar {
                let filled = self.filled_cells();
                let tier = self
                    .bar_class
                    .map(|c| format!(" ({})", c))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "    [{}{}] {}{}",
                    "#".repeat(filled),
                    "-".repeat(BAR_CELLS - filled),
                    self.bar_width,
                    tier
                )?;
            }
        }
        Ok(())
    }
}

//! Pass/fail reporting
//!
//! Both the aggregator and the validator record one line per check into a
//! [`Report`], grouped by extension. The tally decides the validator's exit
//! code; the aggregator only prints it.

use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 50;

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// One reported check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub verdict: Verdict,
    pub message: String,
}

/// Checks for one extension
#[derive(Debug, Clone, Default)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<CheckLine>,
}

impl ReportSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// Record a passing check
    pub fn pass(&mut self, message: impl Into<String>) {
        self.push(Verdict::Pass, message);
    }

    /// Record a failing check
    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(Verdict::Fail, message);
    }

    pub fn push(&mut self, verdict: Verdict, message: impl Into<String>) {
        self.lines.push(CheckLine {
            verdict,
            message: message.into(),
        });
    }

    pub fn passed(&self) -> usize {
        self.count(Verdict::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(Verdict::Fail)
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.lines.iter().filter(|l| l.verdict == verdict).count()
    }
}

/// Whole-run report
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Informational lines printed before the sections
    pub notes: Vec<String>,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Append a section and return it for recording
    pub fn section(&mut self, title: impl Into<String>) -> &mut ReportSection {
        self.sections.push(ReportSection::new(title));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Existing section with this title, or a new one
    pub fn section_named(&mut self, title: &str) -> &mut ReportSection {
        match self.sections.iter().position(|s| s.title == title) {
            Some(index) => &mut self.sections[index],
            None => self.section(title),
        }
    }

    pub fn passed(&self) -> usize {
        self.sections.iter().map(ReportSection::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.sections.iter().map(ReportSection::failed).sum()
    }

    /// True if and only if no check failed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failure messages across all sections
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter())
            .filter(|l| l.verdict == Verdict::Fail)
            .map(|l| l.message.as_str())
    }
}

/// Renders a report as line-oriented text
#[derive(Debug, Clone, Copy)]
pub struct ReportPrinter {
    color: bool,
}

impl ReportPrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Format one check line
    pub fn format_line(&self, line: &CheckLine) -> String {
        match line.verdict {
            Verdict::Pass if self.color => {
                format!("  {} {} {}", "✓".green(), "PASS:".green().bold(), line.message)
            }
            Verdict::Fail if self.color => {
                format!("  {} {} {}", "✗".red(), "FAIL:".red().bold(), line.message)
            }
            Verdict::Pass => format!("  ✓ PASS: {}", line.message),
            Verdict::Fail => format!("  ✗ FAIL: {}", line.message),
        }
    }

    /// Format a section header
    pub fn format_title(&self, title: &str) -> String {
        let title = format!("── {} ──", title);
        if self.color {
            title.bold().to_string()
        } else {
            title
        }
    }

    /// Format the closing tally
    pub fn format_summary(&self, report: &Report) -> String {
        let rule = "═".repeat(RULE_WIDTH);
        let passed = format!("{} passed", report.passed());
        let failed = format!("{} failed", report.failed());
        let results = if self.color && report.failed() > 0 {
            format!("Results: {}, {}", passed.green(), failed.red().bold())
        } else if self.color {
            format!("Results: {}, {}", passed.green(), failed)
        } else {
            format!("Results: {}, {}", passed, failed)
        };
        format!("{}\n{}\n{}", rule, results, rule)
    }

    /// Render the full report as plain text (for logs and tests)
    pub fn render(&self, report: &Report) -> String {
        let mut output = String::new();
        for note in &report.notes {
            output.push_str(note);
            output.push('\n');
        }
        if !report.notes.is_empty() {
            output.push('\n');
        }
        for section in &report.sections {
            output.push_str(&self.format_title(&section.title));
            output.push('\n');
            for line in &section.lines {
                output.push_str(&self.format_line(line));
                output.push('\n');
            }
            output.push('\n');
        }
        output.push_str(&self.format_summary(report));
        output.push('\n');
        output
    }

    /// Print the report: passes to stdout, failures to stderr
    pub fn print(&self, report: &Report) {
        for note in &report.notes {
            println!("{}", note);
        }
        if !report.notes.is_empty() {
            println!();
        }
        for section in &report.sections {
            println!("{}", self.format_title(&section.title));
            for line in &section.lines {
                match line.verdict {
                    Verdict::Pass => println!("{}", self.format_line(line)),
                    Verdict::Fail => eprintln!("{}", self.format_line(line)),
                }
            }
            println!();
        }
        println!("{}", self.format_summary(report));
    }
}

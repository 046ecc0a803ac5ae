use console::style;
use std::time::{Duration, Instant};

/// Per-database outcome of a dump or restore run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl WorkflowReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_failures() { 1 } else { 0 }
    }
}

/// Prints progress for a sequence of databases and collects the outcomes
pub struct DatabaseReporter {
    action: &'static str,
    total: usize,
    current: usize,
    started: Option<Instant>,
    report: WorkflowReport,
}

impl DatabaseReporter {
    /// `action` is the present participle shown to the user, e.g. "dumping"
    pub fn new(action: &'static str, total: usize) -> Self {
        Self {
            action,
            total,
            current: 0,
            started: None,
            report: WorkflowReport::default(),
        }
    }

    pub fn start_database(&mut self, dbname: &str) {
        self.current += 1;
        self.started = Some(Instant::now());

        if self.total > 1 {
            println!(
                "[{}/{}] {} database: {}",
                self.current,
                self.total,
                capitalize(self.action),
                style(dbname).bold()
            );
        } else {
            println!("{} database: {}", capitalize(self.action), style(dbname).bold());
        }
    }

    /// Number of databases started so far
    pub fn attempted(&self) -> usize {
        self.current
    }

    pub fn step(&self, message: &str) {
        println!("    {}", message);
    }

    pub fn warn(&self, message: &str) {
        eprintln!("    {} {}", style("⚠").yellow(), style(message).yellow());
    }

    pub fn succeed(&mut self, dbname: &str) {
        let elapsed = self.started.take().map(|s| s.elapsed()).unwrap_or_default();
        println!(
            "    {} {} ({})",
            style("✓").green(),
            dbname,
            style(format_duration(elapsed)).dim()
        );
        self.report.succeeded.push(dbname.to_string());
    }

    pub fn fail(&mut self, dbname: &str, error: &anyhow::Error) {
        self.started = None;
        eprintln!(
            "{} Error while {} database: {}",
            style("✗").red(),
            self.action,
            style(dbname).red()
        );
        eprintln!("    {}", style(format!("{:#}", error)).dim());
        self.report.failed.push(dbname.to_string());
    }

    /// Print the summary line and hand back the collected outcomes
    pub fn finish(self) -> WorkflowReport {
        if self.report.has_failures() {
            eprintln!(
                "{} {} of {} database(s) failed: {}",
                style("✗").red(),
                self.report.failed.len(),
                self.total,
                self.report.failed.join(", ")
            );
        } else if self.total > 1 {
            println!(
                "{} {} database(s) done",
                style("✓").green(),
                self.report.succeeded.len()
            );
        }
        self.report
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let millis = d.subsec_millis();

    if total_secs == 0 {
        format!("{}ms", millis)
    } else if total_secs < 60 {
        if millis > 0 {
            format!("{}.{}s", total_secs, millis / 100)
        } else {
            format!("{}s", total_secs)
        }
    } else if total_secs < 3600 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        if secs > 0 {
            format!("{}m{}s", mins, secs)
        } else {
            format!("{}m", mins)
        }
    } else {
        let hours = total_secs / 3600;
        let mins = (total_secs % 3600) / 60;
        if mins > 0 {
            format!("{}h{}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    }
}

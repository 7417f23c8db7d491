//! Dialog-based menus implementing the session's presentation boundary.

use std::path::{Path, PathBuf};

use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};

use tartrim::session::{Action, Candidate, Interact};
use tartrim::{Error, RewriteReport, human_size};

/// Interactive terminal menus built on dialoguer prompts.
pub struct Menu {
    theme: ColorfulTheme,
    term: Term,
    spinner: Option<ProgressBar>,
}

impl Menu {
    /// Creates the menu frontend.
    pub fn new() -> Menu {
        Menu {
            theme: ColorfulTheme::default(),
            term: Term::stdout(),
            spinner: None,
        }
    }

    /// Drops any active spinner so regular output lines up again.
    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Interact for Menu {
    fn choose_action(&mut self, archive: &Path, archive_size: u64) -> Action {
        let items = &[
            "Select from the top 50",
            "Show the list of files selected",
            "Write archive",
            "Move stripped archive over original and reload",
            "Open another archive",
            "Quit",
        ];

        let selection = Select::with_theme(&self.theme)
            .with_prompt(format!(
                "{} ({})",
                archive.display(),
                human_size(archive_size)
            ))
            .items(items)
            .default(0)
            .interact_opt();

        match selection {
            Ok(Some(0)) => Action::SelectTop,
            Ok(Some(1)) => Action::ShowSelection,
            Ok(Some(2)) => Action::WriteArchive,
            Ok(Some(3)) => Action::PromoteStripped,
            Ok(Some(4)) => Action::OpenArchive,
            // Escape and prompt errors both leave the session.
            _ => Action::Quit,
        }
    }

    fn pick_exclusions(&mut self, top: &[(u64, &str)]) -> Vec<String> {
        if top.is_empty() {
            let _ = self.term.write_line("The archive has no regular files.");
            return Vec::new();
        }

        let items: Vec<String> = top
            .iter()
            .map(|(size, path)| format!("{:>10} - {}", human_size(*size), path))
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("Select files to strip")
            .items(&items)
            .interact_opt();

        match picked {
            Ok(Some(indices)) => indices.into_iter().map(|i| top[i].1.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    fn show_selection(&mut self, paths: &[String]) {
        for path in paths {
            let _ = self.term.write_line(path);
        }
        let _ = self.term.write_line("Hit enter to continue");
        let _ = self.term.read_line();
    }

    fn notify_empty_selection(&mut self) {
        let _ = self.term.write_line(&format!(
            "{}",
            style("No files selected yet. Pick some from the top 50 first.").yellow()
        ));
    }

    fn confirm_overwrite(&mut self, destination: &Path) -> bool {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "File exists: {}. Overwrite it?",
                destination.display()
            ))
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn confirm_promote(&mut self, original: &Candidate, stripped: &Candidate) -> bool {
        let _ = self.term.write_line(&format!(
            "  stripped: ({}) {}",
            human_size(stripped.size),
            stripped.path.display()
        ));
        let _ = self.term.write_line(&format!(
            "  original: ({}) {}",
            human_size(original.size),
            original.path.display()
        ));

        Confirm::with_theme(&self.theme)
            .with_prompt("Move the stripped archive over the original?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn confirm_final_write(&mut self) -> bool {
        Confirm::with_theme(&self.theme)
            .with_prompt("The selection has not been written. Write the archive first?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn choose_archive(&mut self, candidates: &[Candidate]) -> Option<PathBuf> {
        if candidates.is_empty() {
            let _ = self.term.write_line("No files found to open.");
            return None;
        }

        let items: Vec<String> = candidates
            .iter()
            .map(|c| {
                let name = c
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| c.path.display().to_string());
                format!("{:>10} {}", human_size(c.size), name)
            })
            .collect();

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select an archive to open")
            .items(&items)
            .default(0)
            .interact_opt();

        match selection {
            Ok(Some(index)) => Some(candidates[index].path.clone()),
            _ => None,
        }
    }

    fn rewrite_started(&mut self, destination: &Path) {
        self.clear_spinner();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!("Writing {}...", destination.display()));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn report_rewrite(&mut self, report: &RewriteReport) {
        self.clear_spinner();
        let _ = self.term.write_line(&format!(
            "Wrote {} in {:.2} seconds",
            report.destination.display(),
            report.elapsed.as_secs_f64()
        ));
        let _ = self
            .term
            .write_line(&format!("  old size: {}", human_size(report.old_size)));
        let _ = self
            .term
            .write_line(&format!("  new size: {}", human_size(report.new_size)));
    }

    fn report_error(&mut self, error: &Error) {
        self.clear_spinner();
        eprintln!("{}", style(format!("Error: {error}")).red());
    }
}

use risk_register::register::{
    DisplaySurface, FormSurface, Navigator, Notice, PageBindings, RegionContent,
    UserInteraction, View,
};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Terminal rendition of the host page: regions print as labelled lines, prompts read
/// from the input stream, and navigation is reported rather than performed.
pub(crate) struct ConsolePage<I, O> {
    input: I,
    output: O,
    regions: BTreeMap<String, Option<&'static str>>,
    form: Option<BTreeMap<String, String>>,
    view: View,
    assume_yes: bool,
}

impl<I: BufRead, O: Write> ConsolePage<I, O> {
    pub(crate) fn new(input: I, output: O, view: View) -> Self {
        Self {
            input,
            output,
            regions: BTreeMap::new(),
            form: None,
            view,
            assume_yes: false,
        }
    }

    pub(crate) fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Exposes the dashboard counters named by `bindings`.
    pub(crate) fn with_dashboard(mut self, bindings: &PageBindings) -> Self {
        self.regions.insert(bindings.total_region.clone(), Some("Total"));
        self.regions
            .insert(bindings.critical_region.clone(), Some("Critical"));
        self.regions.insert(bindings.high_region.clone(), Some("High"));
        self.regions.insert(bindings.medium_region.clone(), Some("Medium"));
        if let Some(low) = &bindings.low_region {
            self.regions.insert(low.clone(), Some("Low"));
        }
        self
    }

    pub(crate) fn with_preview_form(
        mut self,
        bindings: &PageBindings,
        fields: &[(&str, Option<String>)],
    ) -> Self {
        self.regions.insert(bindings.preview_region.clone(), None);
        self.form = Some(
            fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clone().unwrap_or_default()))
                .collect(),
        );
        self
    }

    pub(crate) fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.form.as_mut() {
            Some(form) if form.contains_key(name) => {
                form.insert(name.to_string(), value.to_string());
                true
            }
            _ => false,
        }
    }

    /// Next line of input, trimmed, or `None` at end of input.
    pub(crate) fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    pub(crate) fn print(&mut self, line: &str) {
        let _ = writeln!(self.output, "{line}");
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> O {
        self.output
    }
}

impl<I: BufRead, O: Write> DisplaySurface for ConsolePage<I, O> {
    fn has_region(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    fn write_region(&mut self, id: &str, content: RegionContent) {
        let Some(label) = self.regions.get(id).copied() else {
            return;
        };
        let _ = match label {
            Some(label) => writeln!(self.output, "{label}: {}", content.as_str()),
            None => writeln!(self.output, "{}", content.as_str()),
        };
    }
}

impl<I: BufRead, O: Write> FormSurface for ConsolePage<I, O> {
    fn has_form(&self) -> bool {
        self.form.is_some()
    }

    fn input_names(&self) -> Vec<String> {
        self.form
            .as_ref()
            .map(|form| form.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn field_value(&self, name: &str) -> Option<String> {
        self.form.as_ref().and_then(|form| form.get(name).cloned())
    }
}

impl<I: BufRead, O: Write> UserInteraction for ConsolePage<I, O> {
    // Blocks the calling worker on stdin. Each console command owns the runtime alone;
    // a host shared between tasks must read through `spawn_blocking` instead.
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            let _ = writeln!(self.output, "{prompt} [y/N] y");
            return true;
        }

        let _ = write!(self.output, "{prompt} [y/N] ");
        let _ = self.output.flush();
        matches!(
            self.read_line().map(|answer| answer.to_ascii_lowercase()).as_deref(),
            Some("y" | "yes")
        )
    }

    fn notify(&mut self, notice: Notice) {
        let _ = writeln!(self.output, "{}", notice.message());
    }
}

impl<I: BufRead, O: Write> Navigator for ConsolePage<I, O> {
    fn current_view(&self) -> View {
        self.view.clone()
    }

    fn navigate(&mut self, view: View) {
        let _ = writeln!(self.output, "-> {view}");
        self.view = view;
    }

    fn reload(&mut self) {
        let _ = writeln!(self.output, "-> {} (refreshed)", self.view);
    }
}

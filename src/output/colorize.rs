use owo_colors::OwoColorize;
use syncmark::sync::{RemovalPrompt, SyncDevice};

pub trait Colorize {
    fn to_colored(&self) -> String;
    fn to_plain(&self) -> String;
}

/// A device row, numbered by its position in the group
pub struct ColorizeDevice<'a>(pub usize, pub &'a SyncDevice);

impl<'a> Colorize for ColorizeDevice<'a> {
    fn to_colored(&self) -> String {
        let index = self.0.to_string();
        let name = self.1.display_name().unwrap_or_default();
        let name = if self.1.is_current_device {
            name.bold().green().to_string()
        } else {
            name.bold().to_string()
        };
        let padding = index.len() + 3;
        format!(
            "{}. {}\n{:>padding$} {} {}\n",
            index.blue(),
            name,
            ">".red(),
            self.1.os.yellow(),
            self.1.device_type
        )
    }

    fn to_plain(&self) -> String {
        let index = self.0.to_string();
        let padding = index.len() + 3;
        format!(
            "{}. {}\n{:>padding$} {} {}\n",
            index,
            self.1.display_name().unwrap_or_default(),
            ">",
            self.1.os,
            self.1.device_type
        )
    }
}

pub struct ColorizePrompt<'a>(pub &'a RemovalPrompt);

impl<'a> Colorize for ColorizePrompt<'a> {
    fn to_colored(&self) -> String {
        format!(
            "{}\n{}\n[{}] [{}]\n",
            self.0.title.bold(),
            self.0.message,
            self.0.cancel_button,
            self.0.remove_button.red()
        )
    }

    fn to_plain(&self) -> String {
        format!(
            "{}\n{}\n[{}] [{}]\n",
            self.0.title, self.0.message, self.0.cancel_button, self.0.remove_button
        )
    }
}

use std::io::{self, BufRead, Write};

use serde::Serialize;
use swiftmsg_db::{Database, DbError};
use swiftmsg_lang::LocaleSource;
use tracing::{debug, warn};

/// Line that ends multi-line content entry.
const CONTENT_TERMINATOR: &str = "$%";

const RULE: &str = "-----------------------------";

/// Prompt-driven admin commands over arbitrary input/output streams.
///
/// Store errors are reported on the output and never abort the session;
/// only I/O failures on the streams themselves are returned.
pub struct Console<'a, R, W> {
    db: &'a Database,
    input: R,
    out: W,
    locale: &'a dyn LocaleSource,
    json: bool,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(db: &'a Database, input: R, out: W, locale: &'a dyn LocaleSource) -> Self {
        Self {
            db,
            input,
            out,
            locale,
            json: false,
        }
    }

    /// Emit listings and stats as JSON instead of text.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    // -- Listings --

    pub fn list_all(&mut self) -> io::Result<()> {
        let messages = match self.db.list_all() {
            Ok(m) => m,
            Err(e) => return self.report("Error listing messages", &e),
        };
        if self.json {
            return self.write_json(&messages);
        }

        if messages.is_empty() {
            return writeln!(self.out, "No messages found in the database.");
        }

        writeln!(self.out, "All messages in the database:")?;
        writeln!(self.out, "{}", RULE)?;
        for msg in &messages {
            writeln!(
                self.out,
                "ID: {} | Language: {} | Content: {}",
                msg.id, msg.lang_code, msg.content
            )?;
        }
        writeln!(self.out, "\nTotal: {} message(s)", messages.len())
    }

    pub fn list_for_language(&mut self, hint: &str) -> io::Result<()> {
        let code = swiftmsg_lang::resolve(hint);
        let messages = match self.db.list_by_language(&code) {
            Ok(m) => m,
            Err(e) => return self.report("Error listing messages", &e),
        };
        if self.json {
            return self.write_json(&messages);
        }

        if messages.is_empty() {
            return writeln!(
                self.out,
                "No messages found for language '{}' (code: {}).",
                hint, code
            );
        }

        writeln!(self.out, "Messages for language '{}' (code: {}):", hint, code)?;
        writeln!(self.out, "{}", RULE)?;
        for msg in &messages {
            writeln!(self.out, "ID: {} | Content: {}", msg.id, msg.content)?;
        }
        writeln!(self.out, "\nTotal: {} message(s)", messages.len())
    }

    pub fn stats(&mut self) -> io::Result<()> {
        let stats = match self.db.stats() {
            Ok(s) => s,
            Err(e) => return self.report("Error retrieving statistics", &e),
        };
        if self.json {
            return self.write_json(&stats);
        }

        writeln!(self.out, "Database Statistics")?;
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "Total messages: {}", stats.total)?;
        if !stats.per_language.is_empty() {
            writeln!(self.out, "\nMessages per language:")?;
            for lc in &stats.per_language {
                writeln!(self.out, "  {}: {}", lc.lang_code, lc.count)?;
            }
        }
        Ok(())
    }

    // -- Edits --

    pub fn add(&mut self) -> io::Result<()> {
        let id = self.prompt("Enter message ID: ")?.unwrap_or_default();
        let lang = self
            .prompt("Enter language code (required): ")?
            .unwrap_or_default();
        if lang.is_empty() {
            return writeln!(self.out, "Error: Language code is required");
        }

        let code = swiftmsg_lang::resolve(&lang);
        writeln!(self.out, "Using language code: {}", code)?;

        writeln!(
            self.out,
            "Enter message content (type {} on a new line when finished):",
            CONTENT_TERMINATOR
        )?;
        let content = self.read_content()?;

        if id.is_empty() || content.is_empty() {
            return writeln!(self.out, "Error: Message ID and content must be provided");
        }

        match self.db.add(&id, &code, &content) {
            Ok(()) => writeln!(
                self.out,
                "Message '{}' in language '{}' added successfully.",
                id, code
            ),
            Err(e) => self.report("Error adding message", &e),
        }
    }

    /// Delete one language variant, or every variant when no language is given.
    pub fn delete(&mut self) -> io::Result<()> {
        let id = self
            .prompt("Enter message ID to delete: ")?
            .unwrap_or_default();
        if id.is_empty() {
            return writeln!(self.out, "Error: Message ID must be provided");
        }

        let lang = self
            .prompt("Enter language code (leave empty to delete all languages): ")?
            .unwrap_or_default();
        let code = (!lang.is_empty()).then(|| swiftmsg_lang::resolve(&lang));

        let target = match &code {
            Some(code) => format!("'{}' in language '{}'", id, code),
            None => format!("'{}' in all languages", id),
        };
        let confirm = self
            .prompt(&format!("Are you sure you want to delete message {}? (y/n): ", target))?
            .unwrap_or_default();
        if !confirm.eq_ignore_ascii_case("y") {
            return writeln!(self.out, "Deletion cancelled.");
        }

        let removed = match &code {
            Some(code) => self.db.delete(code, &id).map(usize::from),
            None => self.db.delete_by_id(&id),
        };
        match removed {
            Ok(0) => writeln!(self.out, "Message {} not found.", target),
            Ok(n) => {
                debug!("Deleted {} row(s) for '{}'", n, id);
                writeln!(self.out, "Message {} deleted successfully ({} row(s)).", target, n)
            }
            Err(e) => self.report("Error deleting message", &e),
        }
    }

    // -- Lookups --

    pub fn get(&mut self) -> io::Result<()> {
        let id = self.prompt("Enter message ID: ")?.unwrap_or_default();
        let lang = self.prompt("Enter language code: ")?.unwrap_or_default();
        if id.is_empty() || lang.is_empty() {
            return writeln!(self.out, "Error: Both ID and language code must be provided");
        }

        match self.db.get(&lang, &id) {
            Ok(content) => writeln!(self.out, "Message content: {}", content),
            Err(e) => self.report("Error retrieving message", &e),
        }
    }

    pub fn get_system(&mut self) -> io::Result<()> {
        let id = self.prompt("Enter message ID: ")?.unwrap_or_default();
        if id.is_empty() {
            return writeln!(self.out, "Error: Message ID must be provided");
        }

        match self.db.get_system_with(self.locale, &id) {
            Ok(content) => writeln!(
                self.out,
                "Message content (using system language): {}",
                content
            ),
            Err(e) => self.report("Error retrieving message", &e),
        }
    }

    // -- Menu --

    /// Menu loop; returns on "0" or end of input.
    pub fn interactive(&mut self) -> io::Result<()> {
        let sys_lang = swiftmsg_lang::system_language_from(self.locale);

        loop {
            writeln!(self.out, "\nMessage Database Admin Tool")?;
            writeln!(self.out, "{}", RULE)?;
            writeln!(self.out, "System Language: {}", sys_lang)?;
            writeln!(self.out, "1. Add message")?;
            writeln!(self.out, "2. List messages")?;
            writeln!(self.out, "3. Delete message")?;
            writeln!(self.out, "4. Get message using system language")?;
            writeln!(self.out, "5. Show statistics")?;
            writeln!(self.out, "0. Exit")?;

            let Some(choice) = self.prompt("\nEnter your choice: ")? else {
                writeln!(self.out)?;
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.add()?,
                "2" => {
                    let lang = self
                        .prompt("Enter language code (leave empty to list all): ")?
                        .unwrap_or_default();
                    if lang.is_empty() {
                        self.list_all()?;
                    } else {
                        self.list_for_language(&lang)?;
                    }
                }
                "3" => self.delete()?,
                "4" => self.get_system()?,
                "5" => self.stats()?,
                "0" => return writeln!(self.out, "Exiting..."),
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    // -- Helpers --

    /// Print `text` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Raw lines up to the terminator line, line endings preserved.
    fn read_content(&mut self) -> io::Result<String> {
        let mut content = String::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 || line.trim() == CONTENT_TERMINATOR {
                break;
            }
            content.push_str(&line);
        }
        Ok(content)
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)
    }

    fn report(&mut self, context: &str, err: &DbError) -> io::Result<()> {
        if matches!(err, DbError::Storage(_) | DbError::LockPoisoned(_)) {
            warn!("{}: {}", context, err);
        }
        writeln!(self.out, "{}: {}", context, err)
    }
}

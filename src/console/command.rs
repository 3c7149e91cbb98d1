use crate::api::operations::Operation;
use crate::core::error::CommandError;
use crate::form::binder::FormField;

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `set <field> [value...]`, the value is the rest of the line
    Set(FormField, String),
    /// `unset <field>`
    Unset(FormField),
    Show,
    Results,
    Clear,
    Run(Operation),
    Help,
    Quit,
    /// Blank line or `#` comment
    Nothing,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Command::Nothing);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                Ok(Command::Set(parse_field(name, "set")?, value.to_string()))
            }
            "unset" => Ok(Command::Unset(parse_field(rest, "unset")?)),
            "show" | "form" => Ok(Command::Show),
            "results" | "list" => Ok(Command::Results),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => other
                .parse::<Operation>()
                .map(Command::Run)
                .map_err(|_| CommandError::UnknownCommand(word.to_string())),
        }
    }
}

fn parse_field(name: &str, usage: &'static str) -> Result<FormField, CommandError> {
    if name.trim().is_empty() {
        return Err(CommandError::MissingField(usage));
    }
    name.parse::<FormField>().map_err(CommandError::UnknownField)
}

pub const HELP: &str = "\
Commands:
  set <field> [value]   set a form field (id, username, password, email,
                        firstname, lastname, phone, address, active, promo)
  unset <field>         empty a form field
  show                  print the form
  results               print the last search results
  clear                 empty every form field
  search                search customers using the non-empty fields as filters
  retrieve              load the customer with the form id
  create                create a customer from the form
  update                update the customer with the form id
  delete                delete the customer with the form id
  activate | deactivate | subscribe | unsubscribe
                        change the lifecycle state of the customer with the form id
  healthcheck           check that the customer service is up
  quit                  leave the console
";

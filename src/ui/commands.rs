use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Clear,
    Help,
    Key,
    Models,
    /// `:model` with an optional name, id or position.
    Model(Option<String>),
    Submit(String),
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(rest) = trimmed.strip_prefix(':') else {
            return Ok(Command::Submit(s.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };
        Ok(match name.to_lowercase().as_str() {
            "exit" | "quit" | "q" => Command::Exit,
            "clear" => Command::Clear,
            "help" | "h" => Command::Help,
            "key" => Command::Key,
            "models" => Command::Models,
            "model" => Command::Model(arg),
            _ => Command::Submit(s.to_string()),
        })
    }
}

pub const COMMAND_BOX: &str = "\
┌──────────────────────────────────────────────┐\n\
│              Available Commands              │\n\
├──────────────────────────────────────────────┤\n\
│  <text>       - Analyze an SAP error         │\n\
├──────────────────────────────────────────────┤\n\
│  `:key`       - Enter a different API key    │\n\
├──────────────────────────────────────────────┤\n\
│  `:model [n]` - Choose the AI model          │\n\
├──────────────────────────────────────────────┤\n\
│  `:models`    - Show supported models        │\n\
├──────────────────────────────────────────────┤\n\
│  `:clear`     - Clear the screen             │\n\
├──────────────────────────────────────────────┤\n\
│  `:exit`      - Quit the application         │\n\
└──────────────────────────────────────────────┘";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Command {
        s.parse().unwrap()
    }

    #[test]
    fn plain_text_is_a_submission() {
        assert_eq!(
            parse("DBIF_RSQL_INVALID_RSQL"),
            Command::Submit("DBIF_RSQL_INVALID_RSQL".into())
        );
        assert_eq!(parse("exit"), Command::Submit("exit".into()));
        assert_eq!(parse(""), Command::Submit("".into()));
    }

    #[test]
    fn colon_commands() {
        assert_eq!(parse(":exit"), Command::Exit);
        assert_eq!(parse(" :Q "), Command::Exit);
        assert_eq!(parse(":clear"), Command::Clear);
        assert_eq!(parse(":key"), Command::Key);
        assert_eq!(parse(":models"), Command::Models);
        assert_eq!(parse(":model"), Command::Model(None));
        assert_eq!(parse(":model  Llama 3 8B "), Command::Model(Some("Llama 3 8B".into())));
    }

    #[test]
    fn unknown_colon_text_is_submitted_verbatim() {
        assert_eq!(parse(":0x0 dump"), Command::Submit(":0x0 dump".into()));
    }
}

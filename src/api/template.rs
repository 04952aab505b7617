use std::{
  collections::{HashMap, HashSet},
  sync::LazyLock,
};

use regex::Regex;

use crate::error::{RenderError, Result};

pub type Values = HashMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))",
  )
  .expect("placeholder pattern should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
  Escape,
  Placeholder(&'a str),
  Invalid,
}

#[derive(Debug, Clone, Copy)]
struct Site<'a> {
  start: usize,
  end: usize,
  token: Token<'a>,
}

/// Text with `$name`, `${name}` and `$$` sequences.
///
/// Substitution is strict: every placeholder must have a value and every `$`
/// must start one of the recognized forms.
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
  text: &'a str,
}

impl<'a> Template<'a> {
  pub fn new(text: &'a str) -> Self {
    Self { text }
  }

  fn sites(self) -> impl Iterator<Item = Site<'a>> {
    PLACEHOLDER.captures_iter(self.text).map(|caps| {
      let whole = caps.get(0).expect("group 0 is always present");
      let token = if caps.name("escaped").is_some() {
        Token::Escape
      } else if let Some(name) = caps.name("named").or_else(|| caps.name("braced")) {
        Token::Placeholder(name.as_str())
      } else {
        Token::Invalid
      };

      Site {
        start: whole.start(),
        end: whole.end(),
        token,
      }
    })
  }

  /// Placeholder names in order of first appearance.
  pub fn placeholders(&self) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    self
      .sites()
      .filter_map(|site| match site.token {
        Token::Placeholder(name) => Some(name),
        _ => None,
      })
      .filter(|name| seen.insert(*name))
      .collect()
  }

  pub fn substitute(&self, values: &Values) -> Result<String> {
    self.substitute_counted(values).map(|(text, _)| text)
  }

  /// Like [`Template::substitute`], also returning how many placeholders were
  /// replaced.
  pub fn substitute_counted(&self, values: &Values) -> Result<(String, usize)> {
    let mut result = String::with_capacity(self.text.len());
    let mut substitutions = 0;
    let mut last = 0;

    for site in self.sites() {
      result.push_str(&self.text[last..site.start]);
      match site.token {
        Token::Escape => result.push('$'),
        Token::Placeholder(name) => {
          let Some(value) = values.get(name) else {
            let (line, column) = position(self.text, site.start);
            return Err(RenderError::MissingKey {
              name: name.to_string(),
              line,
              column,
            });
          };
          result.push_str(value);
          substitutions += 1;
        }
        Token::Invalid => {
          let (line, column) = position(self.text, site.start);
          return Err(RenderError::InvalidPlaceholder { line, column });
        }
      }
      last = site.end;
    }

    result.push_str(&self.text[last..]);
    Ok((result, substitutions))
  }
}

/// 1-based line and column (in chars) of a byte offset.
fn position(text: &str, offset: usize) -> (usize, usize) {
  let before = &text[..offset];
  let line = before.matches('\n').count() + 1;
  let line_start = before.rfind('\n').map(|index| index + 1).unwrap_or(0);
  let column = before[line_start..].chars().count() + 1;
  (line, column)
}

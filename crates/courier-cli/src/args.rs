/// Splits raw command-line tokens into subcommands and named parameters.
///
/// Tokens before the first dash-prefixed token are subcommands. Each
/// dash-prefixed token names a parameter and collects the non-dash
/// tokens that follow it as values. Repeating a parameter name appends
/// to its existing value list, so the downstream shape check sees every
/// value the caller typed.
pub fn shape_args(tokens: &[String]) -> (Vec<String>, Vec<(String, Vec<String>)>) {
    let mut subcommands = Vec::new();
    let mut parameters: Vec<(String, Vec<String>)> = Vec::new();
    let mut current: Option<usize> = None;

    for token in tokens {
        if let Some(name) = strip_dashes(token) {
            let index = parameters
                .iter()
                .position(|(existing, _)| existing == name)
                .unwrap_or_else(|| {
                    parameters.push((name.to_string(), Vec::new()));
                    parameters.len() - 1
                });
            current = Some(index);
        } else if let Some(index) = current {
            parameters[index].1.push(token.clone());
        } else {
            subcommands.push(token.clone());
        }
    }

    // A flag with no following tokens carries a single empty value.
    for (_, values) in &mut parameters {
        if values.is_empty() {
            values.push(String::new());
        }
    }

    (subcommands, parameters)
}

fn strip_dashes(token: &str) -> Option<&str> {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::shape_args;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn flag_collects_the_values_that_follow() {
        let (subcommands, parameters) = shape_args(&tokens(&["--content", "{}"]));

        assert!(subcommands.is_empty());
        assert_eq!(
            parameters,
            vec![("content".to_string(), vec!["{}".to_string()])]
        );
    }

    #[test]
    fn tokens_before_the_first_flag_are_subcommands() {
        let (subcommands, parameters) =
            shape_args(&tokens(&["extra", "things", "--content", "{}"]));

        assert_eq!(subcommands, vec!["extra", "things"]);
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn repeated_flag_accumulates_values() {
        let (_, parameters) = shape_args(&tokens(&["--content", "a", "--content", "b"]));

        assert_eq!(
            parameters,
            vec![(
                "content".to_string(),
                vec!["a".to_string(), "b".to_string()]
            )]
        );
    }

    #[test]
    fn flag_without_values_gets_one_empty_value() {
        let (_, parameters) = shape_args(&tokens(&["--content"]));
        assert_eq!(
            parameters,
            vec![("content".to_string(), vec![String::new()])]
        );
    }

    #[test]
    fn single_dash_names_a_parameter_too() {
        let (_, parameters) = shape_args(&tokens(&["-content", "{}"]));
        assert_eq!(parameters[0].0, "content");
    }

    #[test]
    fn parameter_order_is_first_seen() {
        let (_, parameters) = shape_args(&tokens(&["--b", "1", "--a", "2", "--b", "3"]));

        let names: Vec<_> = parameters.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(parameters[0].1, vec!["1", "3"]);
    }

    #[test]
    fn bare_dashes_are_plain_values() {
        let (subcommands, parameters) = shape_args(&tokens(&["-", "--content", "--"]));

        assert_eq!(subcommands, vec!["-"]);
        assert_eq!(parameters, vec![("content".to_string(), vec!["--".to_string()])]);
    }
}

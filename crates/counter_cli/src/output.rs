use cli::args::OutputFormatArg;
use counter_app::CounterViewModel;

pub(crate) fn render_view(view: &CounterViewModel, format: OutputFormatArg) -> anyhow::Result<String> {
    let output = match format {
        OutputFormatArg::Text => {
            let parity = if view.is_even { " Even" } else { "" };
            format!("Count: {}{}\nDouble: {}\n", view.count, parity, view.double)
        }
        OutputFormatArg::Json => {
            let mut json = serde_json::to_string_pretty(view)?;
            json.push('\n');
            json
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(count: i64) -> CounterViewModel {
        CounterViewModel {
            count,
            double: i128::from(count) * 2,
            is_even: count % 2 == 0,
            writes: 1,
            error: None,
        }
    }

    #[test]
    fn text_marks_even_counts() {
        assert_eq!(
            render_view(&view(2), OutputFormatArg::Text).unwrap(),
            "Count: 2 Even\nDouble: 4\n"
        );
        assert_eq!(
            render_view(&view(-1), OutputFormatArg::Text).unwrap(),
            "Count: -1\nDouble: -2\n"
        );
    }

    #[test]
    fn json_contains_all_fields() {
        let output = render_view(&view(5), OutputFormatArg::Json).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["count"], 5);
        assert_eq!(json["double"], 10);
        assert_eq!(json["is_even"], false);
        assert_eq!(json["writes"], 1);
        assert!(json["error"].is_null());
    }
}

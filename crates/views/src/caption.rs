use compute::instrument_label;
use selection::Selection;

pub fn selection_caption(selection: &Selection) -> String {
    match selection {
        Selection::Unfiltered => "Latest policies".to_string(),
        Selection::Province(name) => format!("Province: {name}"),
        Selection::Instrument(code) => format!("Instrument: {}", instrument_label(code)),
    }
}

//! Location extraction
//!
//! Only the US, Canada and Europe are eligible regions. A message is
//! eligible exactly when [`extract_location_detail`] finds something.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use setter_core::LocationRegion;

use crate::phrases::{PhraseSet, PrioritySet};

/// Region plus the named place, when one was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetail {
    pub region: LocationRegion,
    pub detail: Option<String>,
}

const US_STATES: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "west virginia",
    "virginia",
    "washington",
    "wisconsin",
    "wyoming",
];

const CANADIAN_PROVINCES: &[&str] = &[
    "ontario",
    "quebec",
    "british columbia",
    "alberta",
    "manitoba",
    "saskatchewan",
    "nova scotia",
    "new brunswick",
    "newfoundland and labrador",
    "newfoundland",
    "prince edward island",
    "northwest territories",
    "yukon",
    "nunavut",
];

const EUROPEAN_COUNTRIES: &[&str] = &[
    "austria",
    "belgium",
    "bulgaria",
    "croatia",
    "cyprus",
    "czech republic",
    "czechia",
    "denmark",
    "estonia",
    "finland",
    "france",
    "germany",
    "greece",
    "hungary",
    "northern ireland",
    "ireland",
    "italy",
    "latvia",
    "lithuania",
    "luxembourg",
    "malta",
    "netherlands",
    "holland",
    "poland",
    "portugal",
    "romania",
    "slovakia",
    "slovenia",
    "spain",
    "sweden",
    "united kingdom",
    "uk",
    "england",
    "scotland",
    "wales",
    "norway",
    "switzerland",
    "iceland",
];

/// (region, whether the matched phrase is worth keeping as detail)
static LOCATIONS: Lazy<PrioritySet<(LocationRegion, bool)>> = Lazy::new(|| {
    PrioritySet::new(vec![
        ((LocationRegion::Us, true), PhraseSet::new(US_STATES)),
        ((LocationRegion::Canada, true), PhraseSet::new(CANADIAN_PROVINCES)),
        ((LocationRegion::Eu, true), PhraseSet::new(EUROPEAN_COUNTRIES)),
        (
            (LocationRegion::Eu, false),
            PhraseSet::new(["eu", "europe", "european union"]),
        ),
        (
            (LocationRegion::Us, false),
            PhraseSet::new([
                "united states",
                "usa",
                "u s a",
                "u s",
                "us",
                "america",
                "the states",
            ])
            .with_exclusions([
                "south america",
                "latin america",
                "central america",
                "for us",
                "to us",
                "with us",
                "of us",
                "about us",
                "let us",
            ]),
        ),
        ((LocationRegion::Canada, false), PhraseSet::new(["canada"])),
    ])
});

pub fn extract_location_detail(text: &str) -> Option<LocationDetail> {
    LOCATIONS
        .classify_with_phrase(text)
        .map(|((region, keep_detail), phrase)| LocationDetail {
            region,
            detail: keep_detail.then(|| phrase.to_string()),
        })
}

pub fn is_location_eligible(text: &str) -> bool {
    extract_location_detail(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use proptest::prelude::*;

    fn region(raw: &str) -> Option<LocationRegion> {
        extract_location_detail(&normalize(raw)).map(|l| l.region)
    }

    #[test]
    fn test_regions() {
        assert_eq!(region("I live in Germany"), Some(LocationRegion::Eu));
        assert_eq!(region("Austin, Texas"), Some(LocationRegion::Us));
        assert_eq!(region("Toronto, Ontario"), Some(LocationRegion::Canada));
        assert_eq!(region("somewhere in Europe"), Some(LocationRegion::Eu));
        assert_eq!(region("the U.S."), Some(LocationRegion::Us));
        assert_eq!(region("canada eh"), Some(LocationRegion::Canada));
        assert_eq!(region("somewhere in Asia"), None);
        assert_eq!(region(""), None);
    }

    #[test]
    fn test_detail() {
        let loc = extract_location_detail("i'm in west virginia").unwrap();
        assert_eq!(loc.region, LocationRegion::Us);
        assert_eq!(loc.detail.as_deref(), Some("west virginia"));

        let loc = extract_location_detail("europe").unwrap();
        assert_eq!(loc.detail, None);
    }

    #[test]
    fn test_us_state_before_country() {
        // a US state name outranks a European country of the same name
        assert_eq!(region("georgia"), Some(LocationRegion::Us));
    }

    #[test]
    fn test_false_positives() {
        assert_eq!(region("just trying to figure it out"), None);
        assert_eq!(region("I live in South America"), None);
        assert_eq!(region("it's hard for us"), None);
        assert_eq!(region("I'm from Brazil, Latin America"), None);
    }

    proptest! {
        #[test]
        fn eligibility_matches_extraction(s in "[a-zA-Z ,.'-]{0,60}") {
            let text = normalize(&s);
            prop_assert_eq!(
                is_location_eligible(&text),
                extract_location_detail(&text).is_some()
            );
        }
    }
}

// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

/// Number of features in one session's evidence vector.
pub const FEATURE_COUNT: usize = 17;

/// Columns of the shopping dataset, in evidence order with the label last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Administrative,
    AdministrativeDuration,
    Informational,
    InformationalDuration,
    ProductRelated,
    ProductRelatedDuration,
    BounceRates,
    ExitRates,
    PageValues,
    SpecialDay,
    Month,
    OperatingSystems,
    Browser,
    Region,
    TrafficType,
    VisitorType,
    Weekend,
    Revenue,
}

impl Column {
    pub const ALL: [Column; FEATURE_COUNT + 1] = [
        Column::Administrative,
        Column::AdministrativeDuration,
        Column::Informational,
        Column::InformationalDuration,
        Column::ProductRelated,
        Column::ProductRelatedDuration,
        Column::BounceRates,
        Column::ExitRates,
        Column::PageValues,
        Column::SpecialDay,
        Column::Month,
        Column::OperatingSystems,
        Column::Browser,
        Column::Region,
        Column::TrafficType,
        Column::VisitorType,
        Column::Weekend,
        Column::Revenue,
    ];

    /// Header name as it appears in the CSV file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Administrative => "Administrative",
            Column::AdministrativeDuration => "Administrative_Duration",
            Column::Informational => "Informational",
            Column::InformationalDuration => "Informational_Duration",
            Column::ProductRelated => "ProductRelated",
            Column::ProductRelatedDuration => "ProductRelated_Duration",
            Column::BounceRates => "BounceRates",
            Column::ExitRates => "ExitRates",
            Column::PageValues => "PageValues",
            Column::SpecialDay => "SpecialDay",
            Column::Month => "Month",
            Column::OperatingSystems => "OperatingSystems",
            Column::Browser => "Browser",
            Column::Region => "Region",
            Column::TrafficType => "TrafficType",
            Column::VisitorType => "VisitorType",
            Column::Weekend => "Weekend",
            Column::Revenue => "Revenue",
        }
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

// "June" is spelled out in the dataset, every other month is abbreviated.
const MONTH_TOKENS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "June", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Looks up a month by its dataset token. Matching is exact and case-sensitive,
    /// so `"Jun"` and `"jan"` are both rejected.
    pub fn from_abbreviation(token: &str) -> Option<Month> {
        MONTH_TOKENS.iter().position(|&m| m == token).map(|i| Month::ALL[i])
    }

    /// Zero-based index, January = 0.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorType {
    Returning,
    New,
    Other,
}

impl VisitorType {
    pub fn from_token(token: &str) -> VisitorType {
        match token {
            "Returning_Visitor" => VisitorType::Returning,
            "New_Visitor" => VisitorType::New,
            _ => VisitorType::Other,
        }
    }

    pub fn is_returning(self) -> bool {
        self == VisitorType::Returning
    }
}

/// Exact, case-sensitive boolean decoding used by the Weekend and Revenue columns.
pub fn parse_flag(token: &str) -> bool {
    token == "TRUE"
}

/// One browsing session, decoded from a CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub administrative: i64,
    pub administrative_duration: f64,
    pub informational: i64,
    pub informational_duration: f64,
    pub product_related: i64,
    pub product_related_duration: f64,
    pub bounce_rates: f64,
    pub exit_rates: f64,
    pub page_values: f64,
    pub special_day: f64,
    pub month: Month,
    pub operating_systems: i64,
    pub browser: i64,
    pub region: i64,
    pub traffic_type: i64,
    pub visitor_type: VisitorType,
    pub weekend: bool,
}

impl SessionRecord {
    /// Flattens the session into the numeric evidence vector the classifier consumes.
    pub fn to_evidence(&self) -> [f64; FEATURE_COUNT] {
        [
            self.administrative as f64,
            self.administrative_duration,
            self.informational as f64,
            self.informational_duration,
            self.product_related as f64,
            self.product_related_duration,
            self.bounce_rates,
            self.exit_rates,
            self.page_values,
            self.special_day,
            self.month.index() as f64,
            self.operating_systems as f64,
            self.browser as f64,
            self.region as f64,
            self.traffic_type as f64,
            if self.visitor_type.is_returning() { 1.0 } else { 0.0 },
            if self.weekend { 1.0 } else { 0.0 },
        ]
    }
}

//! Built-in corpus data.

use crate::extract::IdFormat;
use crate::models::document::DocumentType;

use super::{IndicatorSet, SideMatch};

const fn fuzzy(front_threshold: f64, back_threshold: f64) -> SideMatch {
    SideMatch::Fuzzy {
        front_threshold,
        back_threshold,
    }
}

pub(super) fn entries() -> Vec<IndicatorSet> {
    vec![
        IndicatorSet::new(
            DocumentType::Pan,
            &[
                "income tax department",
                "permanent account number",
                "govt of india",
                "father's name",
            ],
            fuzzy(80.0, 80.0),
        )
        .with_front(&["INCOME TAX DEPARTMENT", "PERMANENT ACCOUNT NUMBER", "GOVT. OF INDIA"])
        .with_back(&[
            "INCOME TAX PAN SERVICES UNIT",
            "CBD BELAPUR",
            "NSDL",
            "UTIITSL",
            "QR CODE",
        ])
        .with_id_formats(&[IdFormat::Pan]),
        IndicatorSet::new(
            DocumentType::Aadhaar,
            &[
                "aadhaar",
                "uidai",
                "government of india",
                "year of birth",
                "date of birth",
                "gender",
            ],
            fuzzy(80.0, 80.0),
        )
        .with_front(&["GOVERNMENT OF INDIA", "AADHAAR", "UIDAI", "DOB", "GENDER"])
        .with_back(&["ADDRESS", "DISTRICT", "STATE", "PIN", "CARE OF"])
        .with_id_formats(&[IdFormat::AadhaarSpaced, IdFormat::AadhaarCompact]),
        IndicatorSet::new(
            DocumentType::Voter,
            &[
                "election commission of india",
                "voter id",
                "elector's photo identity card",
                "elector's name",
                "sex",
                "epic",
            ],
            fuzzy(70.0, 60.0),
        )
        .with_front(&[
            "ELECTION COMMISSION OF INDIA",
            "ELECTOR'S PHOTO IDENTITY CARD",
            "NAME",
            "FATHER",
            "DOB",
        ])
        .with_back(&["ADDRESS", "DISTRICT", "STATE", "PIN CODE", "ISSUE DATE"])
        .with_id_formats(&[IdFormat::Voter]),
        IndicatorSet::new(
            DocumentType::Passport,
            &[
                "passport",
                "republic of india",
                "place of birth",
                "date of issue",
                "date of expiry",
            ],
            SideMatch::Exact,
        )
        .with_front(&["PASSPORT", "REPUBLIC OF INDIA", "NATIONALITY", "DATE OF BIRTH"])
        .with_back(&["ADDRESS", "EMERGENCY CONTACT", "PLACE OF ISSUE"])
        .with_id_formats(&[IdFormat::Passport]),
        IndicatorSet::new(
            DocumentType::DrivingLicense,
            &[
                "driving license",
                "dl no",
                "valid till",
                "transport",
                "date of issue",
                "dob",
            ],
            fuzzy(80.0, 80.0),
        )
        .with_front(&["DRIVING LICENCE", "DRIVING LICENSE", "DL NO", "VALID TILL"])
        .with_back(&["AUTHORISED TO DRIVE", "COV", "TRANSPORT", "NON-TRANSPORT"])
        .with_id_formats(&[IdFormat::DrivingLicense]),
        IndicatorSet::new(
            DocumentType::BankPassbook,
            &[
                "account number",
                "ifsc",
                "branch",
                "customer id",
                "balance",
                "transaction",
                "a/c",
            ],
            SideMatch::Exact,
        )
        .with_front(&["ACCOUNT NUMBER", "IFSC", "BRANCH", "CUSTOMER ID", "SAVINGS ACCOUNT"])
        .with_back(&["DEPOSIT", "WITHDRAWAL", "BALANCE", "CHEQUE"])
        .with_id_formats(&[IdFormat::Ifsc]),
    ]
}

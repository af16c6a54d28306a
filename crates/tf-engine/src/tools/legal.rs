//! Legal Assistant: clause review keyed by document type and jurisdiction.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{ANY, KeyedTable, LookupTable, PairTable};

pub static DOCUMENT_TYPE: OptionCatalog = OptionCatalog::new(
    "document_type",
    &[
        CatalogEntry::new("contract", "Service Contract", "Commercial agreement for services"),
        CatalogEntry::new("nda", "Non-Disclosure Agreement", "Protects confidential information"),
        CatalogEntry::new("privacy-policy", "Privacy Policy", "Explains personal data handling"),
        CatalogEntry::new("terms-of-service", "Terms of Service", "Rules for using a product"),
        CatalogEntry::new("employment", "Employment Agreement", "Terms between employer and employee"),
        CatalogEntry::new("lease", "Lease Agreement", "Rental of property"),
    ],
    "contract",
);

pub static JURISDICTION: OptionCatalog = OptionCatalog::new(
    "jurisdiction",
    &[
        CatalogEntry::new("us", "United States", "Federal and state law"),
        CatalogEntry::new("uk", "United Kingdom", "England and Wales"),
        CatalogEntry::new("eu", "European Union", "EU regulations and member state law"),
        CatalogEntry::new("canada", "Canada", "Federal and provincial law"),
        CatalogEntry::new("australia", "Australia", "Commonwealth and state law"),
    ],
    "us",
);

pub static ANALYSIS_DEPTH: OptionCatalog = OptionCatalog::new(
    "analysis_depth",
    &[
        CatalogEntry::new("quick", "Quick Scan", "Headline risks only"),
        CatalogEntry::new("standard", "Standard Review", "Clause-by-clause review"),
        CatalogEntry::new("comprehensive", "Comprehensive Audit", "Full review with drafting notes"),
    ],
    "standard",
);

pub static FOCUS_AREAS: OptionCatalog = OptionCatalog::new(
    "focus_areas",
    &[
        CatalogEntry::new("liability", "Liability", "Caps, indemnities and exclusions"),
        CatalogEntry::new("termination", "Termination", "Exit rights and notice periods"),
        CatalogEntry::new("confidentiality", "Confidentiality", "Scope and duration of secrecy"),
        CatalogEntry::new("intellectual-property", "Intellectual Property", "Ownership and licences"),
        CatalogEntry::new("data-protection", "Data Protection", "Personal data obligations"),
        CatalogEntry::new("payment-terms", "Payment Terms", "Fees, invoicing and late payment"),
        CatalogEntry::new("dispute-resolution", "Dispute Resolution", "Governing law and forum"),
    ],
    "liability",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "legal-assistant",
    title: "AI Legal Assistant",
    description: "Review legal documents for risks, missing clauses and jurisdiction issues.",
    category: Category::Legal,
    latency_ms: 4000,
    fields: &[
        FieldSpec::choice("documentType", "Document type", &DOCUMENT_TYPE),
        FieldSpec::choice("jurisdiction", "Jurisdiction", &JURISDICTION),
        FieldSpec::choice("analysisDepth", "Analysis depth", &ANALYSIS_DEPTH),
        FieldSpec::multi(
            "focusAreas",
            "Focus areas",
            &FOCUS_AREAS,
            &["liability", "termination"],
        ),
        FieldSpec::text("documentText", "Document text", "Paste the document or a clause"),
        FieldSpec::toggle("includeRecommendations", "Include recommendations", true),
        FieldSpec::toggle("plainLanguageSummary", "Plain-language summary", true),
    ],
};

/// Governing framework keyed by `(documentType, jurisdiction)`.
const FRAMEWORK: PairTable<&str> = LookupTable::new(
    "legal_framework",
    &[
        (("contract", "us"), "Uniform Commercial Code and state contract law"),
        (("contract", "uk"), "Common law of contract and the Unfair Contract Terms Act 1977"),
        (("employment", "us"), "Fair Labor Standards Act and state employment statutes"),
        (("employment", "uk"), "Employment Rights Act 1996"),
        (("employment", "eu"), "Working Time Directive and national labour codes"),
        (("privacy-policy", "us"), "CCPA/CPRA and FTC Act Section 5"),
        (("privacy-policy", "canada"), "PIPEDA"),
        (("privacy-policy", "australia"), "Privacy Act 1988 and the Australian Privacy Principles"),
        (("privacy-policy", ANY), "General data protection principles"),
        (("lease", ANY), "Local landlord and tenant legislation"),
        ((ANY, "eu"), "GDPR and the Unfair Contract Terms Directive"),
        ((ANY, "uk"), "UK GDPR and the Consumer Rights Act 2015"),
        ((ANY, "australia"), "Australian Consumer Law"),
    ],
    "General principles of contract law",
);

/// Sample clause used when no document text is supplied.
pub const SAMPLE_CLAUSE: KeyedTable<&str> = LookupTable::new(
    "legal_sample_clause",
    &[
        (
            "nda",
            "The Recipient shall hold all Confidential Information in strict confidence and shall not disclose it to any third party for a period of five (5) years.",
        ),
        (
            "privacy-policy",
            "We collect personal information you provide to us and may share it with trusted partners to improve our services.",
        ),
        (
            "terms-of-service",
            "We may suspend or terminate your account at any time, for any reason, without notice.",
        ),
        (
            "employment",
            "The Employee agrees not to work for any competitor for a period of twenty-four (24) months following termination.",
        ),
        (
            "lease",
            "The Tenant shall be responsible for all repairs to the premises, including structural repairs.",
        ),
    ],
    "The Provider's total liability under this Agreement shall not exceed the fees paid in the twelve (12) months preceding the claim.",
);

/// (finding, recommendation) per focus area.
const FINDINGS: KeyedTable<(&str, &str)> = LookupTable::new(
    "legal_findings",
    &[
        (
            "termination",
            (
                "Termination rights appear one-sided and notice periods are not defined.",
                "Add mutual termination for convenience with a 30-day notice period.",
            ),
        ),
        (
            "confidentiality",
            (
                "The definition of confidential information is broad and lacks standard exclusions.",
                "Exclude information that is public, independently developed or lawfully received.",
            ),
        ),
        (
            "intellectual-property",
            (
                "Ownership of work product and pre-existing IP is not clearly separated.",
                "Add a background IP carve-out and an explicit assignment of deliverables.",
            ),
        ),
        (
            "data-protection",
            (
                "Processing purposes and retention periods are not specified.",
                "List lawful bases, retention periods and data subject rights.",
            ),
        ),
        (
            "payment-terms",
            (
                "Payment deadlines and late-payment consequences are missing.",
                "Specify net-30 terms and statutory interest on late payments.",
            ),
        ),
        (
            "dispute-resolution",
            (
                "No governing law or forum is named.",
                "Name the governing law and add an escalation step before litigation.",
            ),
        ),
    ],
    (
        "Liability is capped but indemnities are uncapped and unilateral.",
        "Make indemnities mutual and subject them to the overall liability cap.",
    ),
);

const QUICK_CHECKS: &[&str] = &["Parties identified", "Term stated"];

const STANDARD_CHECKS: &[&str] = &[
    "Parties identified",
    "Term stated",
    "Definitions consistent",
    "Signature blocks complete",
];

const FULL_CHECKS: &[&str] = &[
    "Parties identified",
    "Term stated",
    "Definitions consistent",
    "Signature blocks complete",
    "Schedules referenced correctly",
    "Notices clause present",
];

const DEPTH_ROWS: &[(&str, ((u64, u64), &[&str]))] = &[
    ("quick", ((5, 12), QUICK_CHECKS)),
    ("comprehensive", ((40, 90), FULL_CHECKS)),
];

/// (clauses reviewed range, checklist items)
const DEPTH: KeyedTable<((u64, u64), &[&str])> =
    LookupTable::new("legal_depth", DEPTH_ROWS, ((15, 35), STANDARD_CHECKS));

const RISK_LEVELS: [(u32, &str); 3] = [(70, "High"), (40, "Medium"), (0, "Low")];

pub struct LegalAssistant;

impl Tool for LegalAssistant {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let doc_type = chosen(form, "documentType", &DOCUMENT_TYPE);
        let jurisdiction = chosen(form, "jurisdiction", &JURISDICTION);
        let depth = chosen(form, "analysisDepth", &ANALYSIS_DEPTH);
        let focus = chosen_many(form, "focusAreas", &FOCUS_AREAS, &["liability"]);
        let framework = FRAMEWORK.get_pair(doc_type.id, jurisdiction.id);

        let typed = form.text("documentText").trim();
        let (text, is_sample) = if typed.is_empty() {
            (*SAMPLE_CLAUSE.get(doc_type.id), true)
        } else {
            (typed, false)
        };
        let ((lo, hi), checklist) = *DEPTH.get(depth.id);

        let mut w = ReportWriter::new();
        w.title(&format!("Legal Analysis: {}", doc_type.label))
            .field("Document Type", doc_type.label)
            .field("Jurisdiction", jurisdiction.label)
            .field("Governing Framework", framework)
            .field("Analysis Depth", depth.label)
            .field("Focus Areas", join_labels(&focus))
            .field("Clauses Reviewed", flavor.count(lo, hi));

        w.heading("Reviewed Text");
        if is_sample {
            w.paragraph("_No document supplied, analysing a representative sample clause._");
        }
        w.quote(text);

        w.heading("Findings");
        let mut scores: Vec<u32> = Vec::with_capacity(focus.len());
        for area in &focus {
            let (finding, _) = FINDINGS.get(area.id);
            let score = flavor.percent(20, 90);
            scores.push(score);
            w.subheading(area.label)
                .field("Risk", format!("{} ({}/100)", risk_label(score), score))
                .field("Scope", area.description)
                .paragraph(finding);
        }

        let overall = if scores.is_empty() {
            0
        } else {
            scores.iter().sum::<u32>() / scores.len() as u32
        };
        w.heading("Risk Summary")
            .field("Overall Risk", format!("{} ({}/100)", risk_label(overall), overall))
            .field(
                "Compliance Confidence",
                format!("{}%", flavor.percent(60, 95)),
            );

        if form.flag("includeRecommendations") {
            w.heading("Recommendations");
            for (i, area) in focus.iter().enumerate() {
                let (_, recommendation) = FINDINGS.get(area.id);
                w.numbered(i + 1, format!("{}: {}", area.label, recommendation));
            }
        }

        w.heading("Completeness Checklist");
        for item in checklist {
            w.checkbox(true, item);
        }

        if form.flag("plainLanguageSummary") {
            w.heading("Plain-Language Summary").paragraph(format!(
                "This {} is reviewed against {} in {}. The main points to negotiate are {}.",
                doc_type.label.to_lowercase(),
                framework,
                jurisdiction.label,
                join_labels(&focus).to_lowercase()
            ));
        }

        w.heading("Disclaimer").paragraph(
            "This analysis is generated for demonstration purposes and is not legal advice. \
             Consult a qualified lawyer before relying on any document.",
        );

        w.finish()
    }
}

fn risk_label(score: u32) -> &'static str {
    RISK_LEVELS
        .iter()
        .find(|(min, _)| score >= *min)
        .map_or("Low", |(_, label)| *label)
}

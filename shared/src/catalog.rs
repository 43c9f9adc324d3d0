//! 实体页面目录
//!
//! 每个门户的 `/{portal}/{key}` 页面都由这里的某个 schema 渲染。

use crate::role::Portal;
use crate::schema::{
    AttachmentSpec, Capabilities, FieldKind, FieldSpec, LookupSpec, ResourceSchema,
};

// =========================================================
// 选项与引用
// =========================================================

const APPLICATION_STATUS: &[(&str, &str)] = &[
    ("draft", "Draft"),
    ("filed", "Filed"),
    ("examination", "Under Examination"),
    ("advertised", "Advertised"),
    ("opposed", "Opposed"),
    ("registered", "Registered"),
    ("refused", "Refused"),
    ("abandoned", "Abandoned"),
];

const OPPOSITION_STATUS: &[(&str, &str)] = &[
    ("pending", "Pending"),
    ("hearing", "Hearing"),
    ("decided", "Decided"),
    ("withdrawn", "Withdrawn"),
];

const HEARING_STATUS: &[(&str, &str)] = &[
    ("scheduled", "Scheduled"),
    ("adjourned", "Adjourned"),
    ("completed", "Completed"),
];

const RENEWAL_STATUS: &[(&str, &str)] = &[
    ("due", "Due"),
    ("filed", "Filed"),
    ("renewed", "Renewed"),
    ("lapsed", "Lapsed"),
];

const USER_ROLE_OPTIONS: &[(&str, &str)] = &[
    ("admin", "Admin"),
    ("user", "User"),
    ("agent", "Agent"),
];

pub const CUSTOMER_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/customers",
    label_key: "name",
};
const AGENT_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/agents",
    label_key: "name",
};
const APPLICATION_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/applications",
    label_key: "trademark",
};
const CLASS_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/classes",
    label_key: "number",
};
const COUNTRY_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/countries",
    label_key: "name",
};
const BUSINESS_TYPE_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/business-types",
    label_key: "name",
};
const FILE_STATUS_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/file-statuses",
    label_key: "name",
};
const TM_FORM_LOOKUP: LookupSpec = LookupSpec {
    endpoint: "/api/tm-forms",
    label_key: "name",
};

const DOCUMENT_UPLOAD: AttachmentSpec = AttachmentSpec {
    field: "file",
    accept: ".pdf,.doc,.docx,.jpg,.jpeg,.png",
    required_on_create: true,
    downloadable: true,
};

const LOGO_UPLOAD: AttachmentSpec = AttachmentSpec {
    field: "logo",
    accept: "image/*",
    required_on_create: false,
    downloadable: false,
};

// =========================================================
// 主数据
// =========================================================

pub static CUSTOMERS: ResourceSchema = ResourceSchema {
    key: "customers",
    title: "Customers",
    endpoint: "/api/customers",
    fields: &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("phone", "Phone", FieldKind::Phone),
        FieldSpec::new("business_type", "Business Type", FieldKind::Lookup(&BUSINESS_TYPE_LOOKUP)),
        FieldSpec::text("city", "City"),
        FieldSpec::new("address", "Address", FieldKind::TextArea).form_only(),
        FieldSpec::new("password", "Portal Password", FieldKind::Password)
            .required()
            .form_only(),
    ],
    filters: &[
        FieldSpec::text("name", "Name"),
        FieldSpec::text("city", "City"),
    ],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static AGENTS: ResourceSchema = ResourceSchema {
    key: "agents",
    title: "Agents",
    endpoint: "/api/agents",
    fields: &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("phone", "Phone", FieldKind::Phone),
        FieldSpec::text("registration_no", "Registration No."),
        FieldSpec::new("country", "Country", FieldKind::Lookup(&COUNTRY_LOOKUP)),
        FieldSpec::new("password", "Portal Password", FieldKind::Password)
            .required()
            .form_only(),
    ],
    filters: &[FieldSpec::text("name", "Name")],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static USERS: ResourceSchema = ResourceSchema {
    key: "users",
    title: "Users",
    endpoint: "/api/users",
    fields: &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("role", "Role", FieldKind::Select(USER_ROLE_OPTIONS)).required(),
        FieldSpec::new("password", "Password", FieldKind::Password)
            .required()
            .form_only(),
    ],
    filters: &[FieldSpec::text("email", "Email")],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static TM_FORMS: ResourceSchema = ResourceSchema {
    key: "tm-forms",
    title: "TM Forms",
    endpoint: "/api/tm-forms",
    fields: &[
        FieldSpec::text("name", "Form").required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::new("fee", "Fee", FieldKind::Number),
    ],
    filters: &[],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static FILE_STATUSES: ResourceSchema = ResourceSchema {
    key: "file-statuses",
    title: "File Statuses",
    endpoint: "/api/file-statuses",
    fields: &[
        FieldSpec::text("name", "Status").required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ],
    filters: &[],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static BUSINESS_TYPES: ResourceSchema = ResourceSchema {
    key: "business-types",
    title: "Business Types",
    endpoint: "/api/business-types",
    fields: &[FieldSpec::text("name", "Business Type").required()],
    filters: &[],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static CITIES: ResourceSchema = ResourceSchema {
    key: "cities",
    title: "Cities",
    endpoint: "/api/cities",
    fields: &[
        FieldSpec::text("name", "City").required(),
        FieldSpec::new("country", "Country", FieldKind::Lookup(&COUNTRY_LOOKUP)).required(),
    ],
    filters: &[FieldSpec::text("name", "City")],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static COUNTRIES: ResourceSchema = ResourceSchema {
    key: "countries",
    title: "Countries",
    endpoint: "/api/countries",
    fields: &[
        FieldSpec::text("name", "Country").required(),
        FieldSpec::text("code", "Code"),
    ],
    filters: &[],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static CLASSES: ResourceSchema = ResourceSchema {
    key: "classes",
    title: "Classes",
    endpoint: "/api/classes",
    fields: &[
        FieldSpec::new("number", "Class No.", FieldKind::Number).required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ],
    filters: &[],
    capabilities: Capabilities::FULL,
    attachment: None,
};

// =========================================================
// 业务实体
// =========================================================

pub static APPLICATIONS: ResourceSchema = ResourceSchema {
    key: "applications",
    title: "Applications",
    endpoint: "/api/applications",
    fields: &[
        FieldSpec::text("application_no", "Application No.").required(),
        FieldSpec::text("trademark", "Trademark").required(),
        FieldSpec::new("customer", "Customer", FieldKind::Lookup(&CUSTOMER_LOOKUP)).required(),
        FieldSpec::new("agent", "Agent", FieldKind::Lookup(&AGENT_LOOKUP)),
        FieldSpec::new("class_no", "Class", FieldKind::Lookup(&CLASS_LOOKUP)).required(),
        FieldSpec::new("tm_form", "TM Form", FieldKind::Lookup(&TM_FORM_LOOKUP)).form_only(),
        FieldSpec::date("filing_date", "Filing Date").required(),
        FieldSpec::new("status", "Status", FieldKind::Select(APPLICATION_STATUS)),
        FieldSpec::new("file_status", "File Status", FieldKind::Lookup(&FILE_STATUS_LOOKUP))
            .form_only(),
        FieldSpec::new("goods", "Goods / Services", FieldKind::TextArea).form_only(),
    ],
    filters: &[
        FieldSpec::text("application_no", "Application No."),
        FieldSpec::text("trademark", "Trademark"),
        FieldSpec::new("status", "Status", FieldKind::Select(APPLICATION_STATUS)),
    ],
    capabilities: Capabilities::FULL,
    attachment: Some(LOGO_UPLOAD),
};

pub static OPPOSITIONS: ResourceSchema = ResourceSchema {
    key: "oppositions",
    title: "Oppositions",
    endpoint: "/api/oppositions",
    fields: &[
        FieldSpec::text("opposition_no", "Opposition No.").required(),
        FieldSpec::new("application", "Application", FieldKind::Lookup(&APPLICATION_LOOKUP))
            .required(),
        FieldSpec::text("opponent", "Opponent").required(),
        FieldSpec::date("filed_on", "Filed On").required(),
        FieldSpec::new("status", "Status", FieldKind::Select(OPPOSITION_STATUS)),
        FieldSpec::new("remarks", "Remarks", FieldKind::TextArea).form_only(),
    ],
    filters: &[FieldSpec::text("opposition_no", "Opposition No.")],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static JOURNALS: ResourceSchema = ResourceSchema {
    key: "journals",
    title: "Journal Entries",
    endpoint: "/api/journals",
    fields: &[
        FieldSpec::text("journal_no", "Journal No.").required(),
        FieldSpec::date("published_on", "Published On").required(),
        FieldSpec::text("application_no", "Application No.").required(),
        FieldSpec::text("trademark", "Trademark").required(),
        FieldSpec::new("class_no", "Class", FieldKind::Number).required(),
        FieldSpec::text("proprietor", "Proprietor"),
    ],
    filters: &[
        FieldSpec::text("journal_no", "Journal No."),
        FieldSpec::text("trademark", "Trademark"),
    ],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static HEARINGS: ResourceSchema = ResourceSchema {
    key: "hearings",
    title: "Hearings",
    endpoint: "/api/hearings",
    fields: &[
        FieldSpec::new("application", "Application", FieldKind::Lookup(&APPLICATION_LOOKUP))
            .required(),
        FieldSpec::date("hearing_date", "Hearing Date").required(),
        FieldSpec::text("officer", "Officer"),
        FieldSpec::new("status", "Status", FieldKind::Select(HEARING_STATUS)),
        FieldSpec::new("outcome", "Outcome", FieldKind::TextArea).form_only(),
    ],
    filters: &[FieldSpec::date("hearing_date", "Hearing Date")],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static RENEWALS: ResourceSchema = ResourceSchema {
    key: "renewals",
    title: "Renewals",
    endpoint: "/api/renewals",
    fields: &[
        FieldSpec::new("application", "Application", FieldKind::Lookup(&APPLICATION_LOOKUP))
            .required(),
        FieldSpec::date("due_date", "Due Date").required(),
        FieldSpec::date("renewed_on", "Renewed On"),
        FieldSpec::new("status", "Status", FieldKind::Select(RENEWAL_STATUS)),
    ],
    filters: &[FieldSpec::new("status", "Status", FieldKind::Select(RENEWAL_STATUS))],
    capabilities: Capabilities::FULL,
    attachment: None,
};

pub static DOCUMENTS: ResourceSchema = ResourceSchema {
    key: "documents",
    title: "Documents",
    endpoint: "/api/documents",
    fields: &[
        FieldSpec::text("title", "Title").required(),
        FieldSpec::new("application", "Application", FieldKind::Lookup(&APPLICATION_LOOKUP)),
        FieldSpec::new("notes", "Notes", FieldKind::TextArea).form_only(),
        FieldSpec::date("createdAt", "Uploaded").list_only(),
    ],
    filters: &[FieldSpec::text("title", "Title")],
    capabilities: Capabilities::UPLOAD_ONLY,
    attachment: Some(DOCUMENT_UPLOAD),
};

// =========================================================
// 报表（只读）
// =========================================================

pub static RENEWALS_DUE: ResourceSchema = ResourceSchema {
    key: "renewals-due",
    title: "Renewals Due",
    endpoint: "/api/reports/renewals-due",
    fields: &[
        FieldSpec::text("application_no", "Application No."),
        FieldSpec::text("trademark", "Trademark"),
        FieldSpec::text("customer", "Customer"),
        FieldSpec::date("due_date", "Due Date"),
    ],
    filters: &[
        FieldSpec::date("from", "From"),
        FieldSpec::date("to", "To"),
    ],
    capabilities: Capabilities::READ_ONLY,
    attachment: None,
};

pub static HEARING_SCHEDULE: ResourceSchema = ResourceSchema {
    key: "hearing-schedule",
    title: "Hearing Schedule",
    endpoint: "/api/reports/hearing-schedule",
    fields: &[
        FieldSpec::text("application_no", "Application No."),
        FieldSpec::text("trademark", "Trademark"),
        FieldSpec::date("hearing_date", "Hearing Date"),
        FieldSpec::text("officer", "Officer"),
        FieldSpec::new("status", "Status", FieldKind::Select(HEARING_STATUS)),
    ],
    filters: &[
        FieldSpec::date("from", "From"),
        FieldSpec::date("to", "To"),
    ],
    capabilities: Capabilities::READ_ONLY,
    attachment: None,
};

/// 期刊比对结果的列
pub static JOURNAL_MATCHES: ResourceSchema = ResourceSchema {
    key: "journal-matches",
    title: "Matches",
    endpoint: "/api/journals/compare",
    fields: &[
        FieldSpec::text("journal_no", "Journal No."),
        FieldSpec::text("application_no", "Application No."),
        FieldSpec::text("trademark", "Journal Mark"),
        FieldSpec::text("matched_with", "Matched With"),
        FieldSpec::text("class_no", "Class"),
        FieldSpec::text("proprietor", "Proprietor"),
        FieldSpec::date("published_on", "Published On"),
    ],
    filters: &[],
    capabilities: Capabilities::READ_ONLY,
    attachment: None,
};

// =========================================================
// 客户门户视图
// =========================================================

pub static MY_APPLICATIONS: ResourceSchema = ResourceSchema {
    key: "applications",
    title: "My Applications",
    endpoint: "/api/applications",
    fields: &[
        FieldSpec::text("application_no", "Application No."),
        FieldSpec::text("trademark", "Trademark"),
        FieldSpec::text("class_no", "Class"),
        FieldSpec::date("filing_date", "Filing Date"),
        FieldSpec::new("status", "Status", FieldKind::Select(APPLICATION_STATUS)),
    ],
    filters: &[FieldSpec::text("trademark", "Trademark")],
    capabilities: Capabilities::READ_ONLY,
    attachment: None,
};

pub static MY_DOCUMENTS: ResourceSchema = ResourceSchema {
    key: "documents",
    title: "My Documents",
    endpoint: "/api/documents",
    fields: &[
        FieldSpec::text("title", "Title").required(),
        FieldSpec::new("notes", "Notes", FieldKind::TextArea).form_only(),
        FieldSpec::date("createdAt", "Uploaded").list_only(),
    ],
    filters: &[],
    capabilities: Capabilities::UPLOAD_ONLY,
    attachment: Some(DOCUMENT_UPLOAD),
};

const ADMIN_RESOURCES: &[&ResourceSchema] = &[
    &CUSTOMERS,
    &AGENTS,
    &USERS,
    &APPLICATIONS,
    &OPPOSITIONS,
    &JOURNALS,
    &HEARINGS,
    &RENEWALS,
    &DOCUMENTS,
    &TM_FORMS,
    &FILE_STATUSES,
    &BUSINESS_TYPES,
    &CITIES,
    &COUNTRIES,
    &CLASSES,
    &RENEWALS_DUE,
    &HEARING_SCHEDULE,
];

const AGENT_RESOURCES: &[&ResourceSchema] = &[
    &APPLICATIONS,
    &OPPOSITIONS,
    &HEARINGS,
    &RENEWALS,
    &DOCUMENTS,
    &HEARING_SCHEDULE,
];

const USER_RESOURCES: &[&ResourceSchema] = &[&MY_APPLICATIONS, &MY_DOCUMENTS];

/// 门户下可用的实体页面
pub fn resources(portal: Portal) -> &'static [&'static ResourceSchema] {
    match portal {
        Portal::Admin => ADMIN_RESOURCES,
        Portal::Agent => AGENT_RESOURCES,
        Portal::User => USER_RESOURCES,
    }
}

/// 按路由段查找
pub fn find(portal: Portal, key: &str) -> Option<&'static ResourceSchema> {
    resources(portal).iter().copied().find(|s| s.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_unique_per_portal() {
        for portal in Portal::ALL {
            let keys: HashSet<_> = resources(portal).iter().map(|s| s.key).collect();
            assert_eq!(keys.len(), resources(portal).len(), "{portal}");
        }
    }

    #[test]
    fn test_reports_are_read_only() {
        assert!(RENEWALS_DUE.is_read_only());
        assert!(HEARING_SCHEDULE.is_read_only());
        assert!(!CUSTOMERS.is_read_only());
    }

    #[test]
    fn test_find_scoped_by_portal() {
        assert_eq!(find(Portal::User, "applications").map(|s| s.title), Some("My Applications"));
        assert_eq!(find(Portal::Admin, "applications").map(|s| s.title), Some("Applications"));
        assert!(find(Portal::User, "customers").is_none());
    }

    #[test]
    fn test_filter_keys_are_not_passwords() {
        for portal in Portal::ALL {
            for schema in resources(portal) {
                assert!(schema.filters.iter().all(|f| f.kind != FieldKind::Password));
            }
        }
    }

    #[test]
    fn test_upload_forms_leave_timestamp_to_server() {
        for schema in [&DOCUMENTS, &MY_DOCUMENTS] {
            assert!(schema.form_fields().all(|f| f.key != "createdAt"), "{}", schema.key);
            assert!(schema.list_columns().any(|f| f.key == "createdAt"), "{}", schema.key);
            assert!(!schema.empty_draft().contains_key("createdAt"));
        }
    }
}

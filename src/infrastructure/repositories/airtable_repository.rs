use crate::domain::directory::{
    Business, BusinessPage, Category, DirectoryError, DirectoryRepository, Subcategory,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const CATEGORIES_TABLE: &str = "Categories";
const SUBCATEGORIES_TABLE: &str = "Subcategories";
const BUSINESSES_TABLE: &str = "Businesses";

/// Largest page Airtable will return
const FULL_SCAN_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct RecordList<F> {
    records: Vec<Record<F>>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Record<F> {
    id: String,
    fields: F,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NameFields {
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoryFields {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Icon")]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubcategoryFields {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Category")]
    category: Option<LinkedRecords>,
    #[serde(rename = "Businesses")]
    businesses: Option<LinkedRecords>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BusinessFields {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Name_EN")]
    name_en: Option<String>,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Description_EN")]
    description_en: Option<String>,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Phone")]
    phone: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Website")]
    website: Option<String>,
    #[serde(rename = "Image")]
    image: Option<ImageField>,
    #[serde(rename = "IsPremium")]
    is_premium: bool,
    #[serde(rename = "Rating")]
    rating: Option<f64>,
    #[serde(rename = "Reviews")]
    reviews: Option<f64>,
    #[serde(rename = "Category")]
    category: Option<LinkedRecords>,
    #[serde(rename = "Subcategory")]
    subcategory: Option<LinkedRecords>,
}

/// Linked-record fields arrive as id arrays, older bases store a single id
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinkedRecords {
    Many(Vec<String>),
    One(String),
}

impl LinkedRecords {
    fn first(&self) -> Option<&str> {
        match self {
            LinkedRecords::Many(ids) => ids.first().map(String::as_str),
            LinkedRecords::One(id) => Some(id),
        }
    }

    fn contains(&self, id: &str) -> bool {
        match self {
            LinkedRecords::Many(ids) => ids.iter().any(|linked| linked == id),
            LinkedRecords::One(linked) => linked == id,
        }
    }

    fn len(&self) -> usize {
        match self {
            LinkedRecords::Many(ids) => ids.len(),
            LinkedRecords::One(_) => 1,
        }
    }

    fn into_ids(self) -> Vec<String> {
        match self {
            LinkedRecords::Many(ids) => ids,
            LinkedRecords::One(id) => vec![id],
        }
    }
}

fn links_to(link: &Option<LinkedRecords>, id: &str) -> bool {
    link.as_ref().is_some_and(|linked| linked.contains(id))
}

/// Image is either a plain URL or an attachment list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    Url(String),
    Attachments(Vec<Attachment>),
}

#[derive(Debug, Deserialize)]
struct Attachment {
    url: String,
}

impl ImageField {
    fn into_url(self) -> Option<String> {
        match self {
            ImageField::Url(url) => Some(url),
            ImageField::Attachments(attachments) => attachments.into_iter().next().map(|a| a.url),
        }
    }
}

fn business_from_record(record: Record<BusinessFields>) -> Business {
    let fields = record.fields;
    let first_link = |link: &Option<LinkedRecords>| {
        link.as_ref()
            .and_then(LinkedRecords::first)
            .unwrap_or_default()
            .to_string()
    };

    Business {
        category_id: first_link(&fields.category),
        category_ids: fields
            .category
            .map(LinkedRecords::into_ids)
            .unwrap_or_default(),
        subcategory_id: first_link(&fields.subcategory),
        id: record.id,
        name: fields.name,
        name_localized: fields.name_en,
        description: fields.description,
        description_localized: fields.description_en,
        location: fields.location,
        phone: fields.phone,
        email: fields.email,
        website: fields.website,
        image: fields.image.and_then(ImageField::into_url),
        is_premium: fields.is_premium,
        rating: fields.rating,
        reviews: fields.reviews.map(|r| r.max(0.0).round() as u32),
    }
}

/// Filter for businesses linked to both records.
/// Airtable formulas see linked records by primary-field name, not record id,
/// so each name is matched as a whole comma-delimited entry of the joined links.
pub fn listing_formula(category_name: &str, subcategory_name: &str) -> String {
    format!(
        "AND({}, {})",
        linked_name_clause("Category", category_name),
        linked_name_clause("Subcategory", subcategory_name)
    )
}

fn linked_name_clause(field: &str, name: &str) -> String {
    format!(
        "FIND(\",{},\", \",\" & ARRAYJOIN({{{}}}, \",\") & \",\")>0",
        escape_formula_string(name),
        field
    )
}

fn escape_formula_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Airtable REST implementation of the directory repository
pub struct AirtableRepository {
    http_client: reqwest::Client,
    api_url: String,
    base_id: String,
    api_key: String,
    page_size: usize,
}

impl AirtableRepository {
    pub fn new(api_url: String, base_id: String, api_key: String, page_size: usize) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id,
            api_key,
            page_size,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            self.base_id,
            urlencoding::encode(table)
        )
    }

    fn record_url(&self, table: &str, record_id: &str) -> String {
        format!("{}/{}", self.table_url(table), urlencoding::encode(record_id))
    }

    /// GET and decode, mapping non-success statuses to `DirectoryError::Status`
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, DirectoryError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Airtable request failed");
                DirectoryError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            tracing::warn!(
                status = status.as_u16(),
                url = %url,
                message = %message,
                "Airtable returned an error"
            );
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }

    /// Follow continuation cursors until the table is exhausted
    async fn list_all<F: DeserializeOwned>(
        &self,
        table: &str,
        fields: &[&str],
    ) -> Result<Vec<Record<F>>, DirectoryError> {
        let url = self.table_url(table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query: Vec<(&str, String)> =
                vec![("pageSize", FULL_SCAN_PAGE_SIZE.to_string())];
            query.extend(fields.iter().map(|f| ("fields[]", f.to_string())));
            if let Some(cursor) = offset.take() {
                query.push(("offset", cursor));
            }

            let page: RecordList<F> = self.get_json(&url, &query).await?;
            pages += 1;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::debug!(
            table = table,
            pages = pages,
            record_count = records.len(),
            "Airtable table scanned"
        );

        Ok(records)
    }

    /// Returns `Ok(None)` on 404
    async fn find_record<F: DeserializeOwned>(
        &self,
        table: &str,
        record_id: &str,
    ) -> Result<Option<Record<F>>, DirectoryError> {
        match self.get_json(&self.record_url(table, record_id), &[]).await {
            Ok(record) => Ok(Some(record)),
            Err(DirectoryError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Airtable errors look like `{"error": {"type", "message"}}` or `{"error": "NOT_FOUND"}`
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    if let Some(code) = error.as_str() {
        return Some(code.to_string());
    }
    error
        .get("message")
        .or_else(|| error.get("type"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[async_trait]
impl DirectoryRepository for AirtableRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, DirectoryError> {
        let records: Vec<Record<CategoryFields>> = self
            .list_all(CATEGORIES_TABLE, &["Name", "Description", "Icon"])
            .await?;

        Ok(records
            .into_iter()
            .map(|r| Category {
                id: r.id,
                name: r.fields.name,
                description: r.fields.description,
                icon: r.fields.icon,
            })
            .collect())
    }

    async fn list_subcategories(
        &self,
        category_id: &str,
    ) -> Result<Vec<Subcategory>, DirectoryError> {
        let records: Vec<Record<SubcategoryFields>> = self
            .list_all(
                SUBCATEGORIES_TABLE,
                &["Name", "Description", "Category", "Businesses"],
            )
            .await?;

        Ok(records
            .into_iter()
            .filter(|r| links_to(&r.fields.category, category_id))
            .map(|r| Subcategory {
                business_count: r.fields.businesses.as_ref().map_or(0, LinkedRecords::len),
                id: r.id,
                name: r.fields.name,
                description: r.fields.description,
                category_id: category_id.to_string(),
            })
            .collect())
    }

    async fn list_businesses(&self) -> Result<Vec<Business>, DirectoryError> {
        let records: Vec<Record<BusinessFields>> = self.list_all(BUSINESSES_TABLE, &[]).await?;
        Ok(records.into_iter().map(business_from_record).collect())
    }

    async fn find_businesses_page(
        &self,
        category_id: &str,
        subcategory_id: &str,
        cursor: Option<&str>,
    ) -> Result<BusinessPage, DirectoryError> {
        let (category, subcategory) = futures::try_join!(
            self.find_record::<NameFields>(CATEGORIES_TABLE, category_id),
            self.find_record::<NameFields>(SUBCATEGORIES_TABLE, subcategory_id),
        )?;

        let (Some(category), Some(subcategory)) = (category, subcategory) else {
            tracing::info!(
                category_id = %category_id,
                subcategory_id = %subcategory_id,
                "Listing requested for unknown category or subcategory"
            );
            return Err(DirectoryError::NotFound(format!(
                "category {} / subcategory {}",
                category_id, subcategory_id
            )));
        };

        let mut query = vec![
            (
                "filterByFormula",
                listing_formula(&category.fields.name, &subcategory.fields.name),
            ),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push(("offset", cursor.to_string()));
        }

        let page: RecordList<BusinessFields> = self
            .get_json(&self.table_url(BUSINESSES_TABLE), &query)
            .await?;

        // Names are not unique; the record ids decide membership
        let businesses = page
            .records
            .into_iter()
            .filter(|r| {
                links_to(&r.fields.category, category_id)
                    && links_to(&r.fields.subcategory, subcategory_id)
            })
            .map(business_from_record)
            .collect();

        Ok(BusinessPage {
            businesses,
            next_cursor: page.offset,
        })
    }

    async fn find_business(&self, business_id: &str) -> Result<Option<Business>, DirectoryError> {
        Ok(self
            .find_record::<BusinessFields>(BUSINESSES_TABLE, business_id)
            .await?
            .map(business_from_record))
    }
}

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::error::ApiError;

/// HTTP access to one REST collection resource.
///
/// `GET base` lists, `POST base` creates, `PUT base/{id}` replaces and
/// `DELETE base/{id}` removes. Mutation response bodies are not read.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RestClient {
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The member URL for `id`, percent-encoded as a single path segment.
    pub fn member_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    #[instrument(skip(self), fields(url = %self.base_url))]
    pub async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        debug!("Sending list request");
        let resp = self.http.get(self.base_url.clone()).send().await?;
        let resp = ensure_success(resp).await?;
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[instrument(skip(self, body), fields(url = %self.base_url))]
    pub async fn create<T: Serialize>(&self, body: &T) -> Result<(), ApiError> {
        debug!("Sending create request");
        let resp = self.http.post(self.base_url.clone()).json(body).send().await?;
        ensure_success(resp).await.map(|_| ())
    }

    #[instrument(skip(self, body))]
    pub async fn update<T: Serialize>(&self, id: &str, body: &T) -> Result<(), ApiError> {
        debug!("Sending update request");
        let url = self.member_url(id)?;
        let resp = self.http.put(url).json(body).send().await?;
        ensure_success(resp).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        debug!("Sending delete request");
        let url = self.member_url(id)?;
        let resp = self.http.delete(url).send().await?;
        ensure_success(resp).await.map(|_| ())
    }
}

async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    error!(status = status.as_u16(), body = %body, "Resource request rejected");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RestClient {
        let url = Url::parse(&format!("{}/api/produk_ujk", server.uri())).unwrap();
        RestClient::new(url).unwrap()
    }

    #[tokio::test]
    async fn test_list_decodes_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/produk_ujk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"kode_produk": "A1", "nama_produk": "Sabun", "kategori": "Rumah", "harga": 5000, "stok": 3, "deskripsi": "", "tanggal_input": "2024-06-01"},
                {"kode_produk": "B2", "nama_produk": "Sikat", "kategori": null, "harga": "2500.00", "stok": 10, "deskripsi": null, "tanggal_input": null},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let products: Vec<Product> = client_for(&server).list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].code, "A1");
        assert_eq!(products[0].input_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(products[1].price, 2500.0);
        assert_eq!(products[1].input_date, None);
    }

    #[tokio::test]
    async fn test_list_with_out_of_range_row_still_renders() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/produk_ujk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"kode_produk": "A1", "nama_produk": "Sabun", "harga": 5000, "stok": 3},
                {"kode_produk": "R1", "nama_produk": "Retur Sabun", "harga": 5000, "stok": -2},
            ])))
            .mount(&server)
            .await;

        let products: Vec<Product> = client_for(&server).list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].stock, -2);

        let table = crate::render::render_table(&products);
        assert!(table.contains("Sabun"));
        assert!(table.contains("| -2 "));
    }

    #[tokio::test]
    async fn test_create_posts_json_body() {
        let server = MockServer::start().await;
        let product = Product::new("C3", "Lilin", 1500.0, 25)
            .with_input_date(NaiveDate::from_ymd_opt(2024, 7, 17).unwrap());

        Mock::given(method("POST"))
            .and(path("/api/produk_ujk"))
            .and(body_json(json!({
                "kode_produk": "C3",
                "nama_produk": "Lilin",
                "kategori": "",
                "harga": 1500.0,
                "stok": 25,
                "deskripsi": "",
                "tanggal_input": "2024-07-17",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).create(&product).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_targets_encoded_member_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/produk_ujk/A%201"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let product = Product::new("A 1", "Sabun", 5000.0, 3);
        client_for(&server).update("A 1", &product).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_not_found_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/produk_ujk/ZZ"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Produk tidak ditemukan"))
            .mount(&server)
            .await;

        let err = client_for(&server).delete("ZZ").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                body: "Produk tidak ditemukan".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_list_with_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list::<Product>().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_member_url_ignores_trailing_slash() {
        let client = RestClient::new(Url::parse("http://localhost:5000/api/produk_ujk/").unwrap()).unwrap();
        assert_eq!(
            client.member_url("P/9").unwrap().as_str(),
            "http://localhost:5000/api/produk_ujk/P%2F9"
        );
    }
}

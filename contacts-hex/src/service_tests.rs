//! ContactService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Datelike, Duration, NaiveDate, Utc};

    use contacts_types::{
        AppError, AvatarError, AvatarStore, Contact, ContactId, ContactRepository,
        CreateContactRequest, RepoError, UpdateContactRequest, UserId, UserProfile,
        domain::contact::validate_fields,
    };

    use crate::ContactService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        contacts: Mutex<HashMap<ContactId, Contact>>,
        users: Mutex<HashMap<UserId, UserProfile>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                contacts: Mutex::new(HashMap::new()),
                users: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ContactRepository for MockRepo {
        async fn create_contact(
            &self,
            user_id: UserId,
            req: CreateContactRequest,
        ) -> Result<Contact, RepoError> {
            let mut contacts = self.contacts.lock().unwrap();
            if contacts.values().any(|c| c.email == req.email) {
                return Err(RepoError::Conflict(
                    "A contact with this email already exists".into(),
                ));
            }

            let contact = Contact::new(
                user_id,
                req.first_name,
                req.last_name,
                req.email,
                req.phone_number,
                req.birthday,
                req.note,
            )
            .map_err(RepoError::Domain)?;

            contacts.insert(contact.id, contact.clone());
            Ok(contact)
        }

        async fn get_contact(
            &self,
            user_id: UserId,
            id: ContactId,
        ) -> Result<Option<Contact>, RepoError> {
            Ok(self
                .contacts
                .lock()
                .unwrap()
                .get(&id)
                .filter(|c| c.user_id == user_id)
                .cloned())
        }

        async fn list_contacts(
            &self,
            user_id: UserId,
            search: Option<&str>,
        ) -> Result<Vec<Contact>, RepoError> {
            Ok(self
                .contacts
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.user_id == user_id)
                .filter(|c| search.is_none_or(|q| c.matches_query(q)))
                .cloned()
                .collect())
        }

        async fn update_contact(
            &self,
            user_id: UserId,
            id: ContactId,
            req: UpdateContactRequest,
        ) -> Result<Option<Contact>, RepoError> {
            validate_fields(&req.first_name, &req.last_name, &req.email)
                .map_err(RepoError::Domain)?;

            let mut contacts = self.contacts.lock().unwrap();
            if contacts
                .values()
                .any(|c| c.email == req.email && c.id != id)
            {
                return Err(RepoError::Conflict(
                    "A contact with this email already exists".into(),
                ));
            }

            let Some(contact) = contacts.get_mut(&id).filter(|c| c.user_id == user_id) else {
                return Ok(None);
            };

            contact.first_name = req.first_name;
            contact.last_name = req.last_name;
            contact.email = req.email;
            contact.phone_number = req.phone_number;
            contact.birthday = req.birthday;
            contact.note = req.note;
            Ok(Some(contact.clone()))
        }

        async fn delete_contact(
            &self,
            user_id: UserId,
            id: ContactId,
        ) -> Result<Option<Contact>, RepoError> {
            let mut contacts = self.contacts.lock().unwrap();
            match contacts.get(&id) {
                Some(c) if c.user_id == user_id => Ok(contacts.remove(&id)),
                _ => Ok(None),
            }
        }

        async fn set_avatar_url(
            &self,
            user_id: UserId,
            email: &str,
            url: &str,
        ) -> Result<UserProfile, RepoError> {
            let profile = UserProfile::from_parts(
                user_id,
                email.to_string(),
                Some(url.to_string()),
                Utc::now(),
            );
            self.users.lock().unwrap().insert(user_id, profile.clone());
            Ok(profile)
        }

        async fn get_user(&self, user_id: UserId) -> Result<Option<UserProfile>, RepoError> {
            Ok(self.users.lock().unwrap().get(&user_id).cloned())
        }
    }

    /// Avatar store that records nothing and always succeeds.
    pub struct MockAvatarStore;

    #[async_trait]
    impl AvatarStore for MockAvatarStore {
        async fn upload(
            &self,
            filename: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> Result<String, AvatarError> {
            Ok(format!("https://img.test/{}", filename))
        }
    }

    /// Avatar store that simulates an image host outage.
    pub struct FailingAvatarStore;

    #[async_trait]
    impl AvatarStore for FailingAvatarStore {
        async fn upload(
            &self,
            _filename: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> Result<String, AvatarError> {
            Err(AvatarError::Upstream("Image host returned HTTP 500".into()))
        }
    }

    fn service() -> ContactService<MockRepo, MockAvatarStore> {
        ContactService::new(MockRepo::new(), MockAvatarStore)
    }

    fn new_contact(email: &str, birthday: NaiveDate) -> CreateContactRequest {
        CreateContactRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone_number: "+44 20 7946 0000".to_string(),
            birthday,
            note: None,
        }
    }

    fn some_birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()
    }

    /// Projects a date's month and day onto 1992 (a leap year, so Feb 29
    /// survives the projection).
    fn as_birth_year(date: NaiveDate) -> NaiveDate {
        date.with_year(1992).unwrap()
    }

    #[tokio::test]
    async fn test_create_contact() {
        let svc = service();
        let user = UserId::new();

        let contact = svc
            .create_contact(user, new_contact("ada@example.com", some_birthday()))
            .await
            .unwrap();

        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.user_id, user);
    }

    #[tokio::test]
    async fn test_create_contact_empty_name_rejected() {
        let svc = service();

        let mut req = new_contact("ada@example.com", some_birthday());
        req.first_name = "".to_string();

        let result = svc.create_contact(UserId::new(), req).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let svc = service();
        let user = UserId::new();

        svc.create_contact(user, new_contact("ada@example.com", some_birthday()))
            .await
            .unwrap();

        let result = svc
            .create_contact(user, new_contact("ada@example.com", some_birthday()))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_contact_not_found() {
        let svc = service();

        let result = svc.get_contact(UserId::new(), ContactId::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_contacts_search() {
        let svc = service();
        let user = UserId::new();

        svc.create_contact(user, new_contact("ada@example.com", some_birthday()))
            .await
            .unwrap();

        let mut other = new_contact("charles@example.com", some_birthday());
        other.first_name = "Charles".to_string();
        other.last_name = "Babbage".to_string();
        svc.create_contact(user, other).await.unwrap();

        let hits = svc.list_contacts(user, Some("BABBAGE")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Charles");

        let all = svc.list_contacts(user, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_contact_replaces_fields() {
        let svc = service();
        let user = UserId::new();

        let created = svc
            .create_contact(user, new_contact("ada@example.com", some_birthday()))
            .await
            .unwrap();

        let updated = svc
            .update_contact(
                user,
                created.id,
                UpdateContactRequest {
                    first_name: "Augusta".to_string(),
                    last_name: "King-Noel".to_string(),
                    email: "countess@example.com".to_string(),
                    phone_number: "+44 20 0000 0000".to_string(),
                    birthday: some_birthday(),
                    note: Some("married name".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.email, "countess@example.com");
        assert_eq!(updated.note.as_deref(), Some("married name"));
    }

    #[tokio::test]
    async fn test_update_missing_contact_not_found() {
        let svc = service();

        let result = svc
            .update_contact(
                UserId::new(),
                ContactId::new(),
                UpdateContactRequest {
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    phone_number: String::new(),
                    birthday: some_birthday(),
                    note: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_contact_returns_record() {
        let svc = service();
        let user = UserId::new();

        let created = svc
            .create_contact(user, new_contact("ada@example.com", some_birthday()))
            .await
            .unwrap();

        let deleted = svc.delete_contact(user, created.id).await.unwrap();
        assert_eq!(deleted.id, created.id);

        let result = svc.get_contact(user, created.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_window() {
        let svc = service();
        let user = UserId::new();
        let today = Utc::now().date_naive();

        svc.create_contact(
            user,
            new_contact("soon@example.com", as_birth_year(today + Duration::days(3))),
        )
        .await
        .unwrap();

        svc.create_contact(
            user,
            new_contact("later@example.com", as_birth_year(today + Duration::days(30))),
        )
        .await
        .unwrap();

        // Passed yesterday: next occurrence is almost a year out
        svc.create_contact(
            user,
            new_contact("missed@example.com", as_birth_year(today - Duration::days(1))),
        )
        .await
        .unwrap();

        let upcoming = svc.upcoming_birthdays(user, 7).await.unwrap();

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].email, "soon@example.com");
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_sorted_by_next_occurrence() {
        let svc = service();
        let user = UserId::new();
        let today = Utc::now().date_naive();

        svc.create_contact(
            user,
            new_contact("fifth@example.com", as_birth_year(today + Duration::days(5))),
        )
        .await
        .unwrap();

        svc.create_contact(
            user,
            new_contact("second@example.com", as_birth_year(today + Duration::days(2))),
        )
        .await
        .unwrap();

        let upcoming = svc.upcoming_birthdays(user, 7).await.unwrap();

        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].email, "second@example.com");
        assert_eq!(upcoming[1].email, "fifth@example.com");
    }

    #[tokio::test]
    async fn test_upcoming_birthdays_rejects_bad_window() {
        let svc = service();

        assert!(matches!(
            svc.upcoming_birthdays(UserId::new(), 0).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            svc.upcoming_birthdays(UserId::new(), 367).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_avatar_stores_url() {
        let svc = service();
        let user = UserId::new();

        let profile = svc
            .update_avatar(user, "ada@example.com", "me.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(profile.avatar_url.as_deref(), Some("https://img.test/me.png"));

        let stored = svc.repo().get_user(user).await.unwrap().unwrap();
        assert_eq!(stored.avatar_url.as_deref(), Some("https://img.test/me.png"));
    }

    #[tokio::test]
    async fn test_update_avatar_empty_file_rejected() {
        let svc = service();

        let result = svc
            .update_avatar(UserId::new(), "ada@example.com", "me.png", "image/png", vec![])
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_avatar_host_outage_surfaces_bad_gateway() {
        let svc = ContactService::new(MockRepo::new(), FailingAvatarStore);

        let result = svc
            .update_avatar(
                UserId::new(),
                "ada@example.com",
                "me.png",
                "image/png",
                vec![1, 2, 3],
            )
            .await;

        assert!(matches!(result, Err(AppError::BadGateway(_))));
    }
}

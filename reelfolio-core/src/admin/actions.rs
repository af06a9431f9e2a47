use std::fmt;
use std::sync::Arc;

use reelfolio_model::{
    ContactSubmission, GalleryDraft, GalleryId, Locale, NewPortfolioPhoto,
    Page, PhotoId, PortfolioGallery, PortfolioPhoto, Project, ProjectDraft,
    ProjectId,
};
use tracing::{info, warn};

use super::error::{ActionError, ActionResult};
use super::naming::{
    content_type_for, is_image_extension, is_video_extension, parse_tags,
    slugify, unique_storage_name,
};
use crate::application::unit_of_work::AppUnitOfWork;
use crate::auth::{AdminAllowlist, AdminIdentity};
use crate::image::extension;
use crate::storage::{Buckets, ObjectStorage, StorageUrls, UploadOptions};
use crate::sync::{PortfolioSync, SyncReport, is_gallery_image};
use crate::video::VideoLibrary;

/// One year, for objects whose key changes whenever the content does.
const UPLOAD_CACHE_SECONDS: u64 = 31_536_000;

/// A file received from the admin UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn upload_options(&self, ext: &str) -> UploadOptions {
        let content_type = self
            .content_type
            .clone()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| content_type_for(ext).to_string());
        UploadOptions::default()
            .with_cache_control(UPLOAD_CACHE_SECONDS)
            .with_content_type(content_type)
    }
}

#[derive(Clone)]
pub struct AdminActions {
    uow: AppUnitOfWork,
    storage: Arc<dyn ObjectStorage>,
    urls: StorageUrls,
    buckets: Buckets,
    sync: PortfolioSync,
    videos: VideoLibrary,
    allowlist: AdminAllowlist,
}

impl fmt::Debug for AdminActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminActions")
            .field("buckets", &self.buckets)
            .field("allowlist", &self.allowlist.len())
            .finish_non_exhaustive()
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim the free-text fields, slugify the slug and flatten tag input.
fn normalize_draft(draft: ProjectDraft) -> ActionResult<ProjectDraft> {
    let title = draft.title.trim().to_string();
    let slug = slugify(&draft.slug);
    if title.is_empty() || slug.is_empty() {
        return Err(ActionError::new("Title and slug are required"));
    }
    Ok(ProjectDraft {
        slug,
        title,
        summary: trimmed(draft.summary),
        description: trimmed(draft.description),
        credits: trimmed(draft.credits),
        client: trimmed(draft.client),
        piece_type: trimmed(draft.piece_type),
        duration: trimmed(draft.duration),
        video_url: trimmed(draft.video_url),
        external_link: trimmed(draft.external_link),
        tags: draft.tags.iter().flat_map(|t| parse_tags(t)).collect(),
        ..draft
    })
}

impl AdminActions {
    pub fn new(
        uow: AppUnitOfWork,
        storage: Arc<dyn ObjectStorage>,
        urls: StorageUrls,
        buckets: Buckets,
        sync: PortfolioSync,
        videos: VideoLibrary,
        allowlist: AdminAllowlist,
    ) -> Self {
        Self {
            uow,
            storage,
            urls,
            buckets,
            sync,
            videos,
            allowlist,
        }
    }

    pub fn allowlist(&self) -> &AdminAllowlist {
        &self.allowlist
    }

    fn authorize(&self, who: &AdminIdentity) -> ActionResult<()> {
        if self.allowlist.allows(&who.email) {
            Ok(())
        } else {
            warn!(email = %who.email, "admin action rejected");
            Err(ActionError::forbidden())
        }
    }

    async fn project(&self, id: ProjectId) -> ActionResult<Project> {
        self.uow
            .projects
            .get(id)
            .await?
            .ok_or_else(|| ActionError::not_found("Project"))
    }

    async fn gallery(&self, id: GalleryId) -> ActionResult<PortfolioGallery> {
        self.uow
            .galleries
            .get(id)
            .await?
            .ok_or_else(|| ActionError::not_found("Gallery"))
    }

    // Projects

    pub async fn list_projects(
        &self,
        who: &AdminIdentity,
    ) -> ActionResult<Vec<Project>> {
        self.authorize(who)?;
        Ok(self.uow.projects.list_all().await?)
    }

    pub async fn get_project(
        &self,
        who: &AdminIdentity,
        id: ProjectId,
    ) -> ActionResult<Project> {
        self.authorize(who)?;
        self.project(id).await
    }

    /// New projects start unpublished regardless of the draft.
    pub async fn create_project(
        &self,
        who: &AdminIdentity,
        draft: ProjectDraft,
    ) -> ActionResult<Project> {
        self.authorize(who)?;
        let project = Project::from_draft(normalize_draft(draft)?);
        self.uow.projects.insert(&project).await?;
        info!(id = %project.id, slug = %project.slug, "project created");
        Ok(project)
    }

    pub async fn update_project(
        &self,
        who: &AdminIdentity,
        id: ProjectId,
        draft: ProjectDraft,
    ) -> ActionResult<Project> {
        self.authorize(who)?;
        let mut project = self.project(id).await?;
        project.apply_draft(normalize_draft(draft)?);
        if !self.uow.projects.update(&project).await? {
            return Err(ActionError::not_found("Project"));
        }
        Ok(project)
    }

    pub async fn publish_project(
        &self,
        who: &AdminIdentity,
        id: ProjectId,
        published: bool,
    ) -> ActionResult<()> {
        self.authorize(who)?;
        if !self.uow.projects.set_published(id, published).await? {
            return Err(ActionError::not_found("Project"));
        }
        info!(id = %id, published, "project publication changed");
        Ok(())
    }

    pub async fn delete_project(
        &self,
        who: &AdminIdentity,
        id: ProjectId,
    ) -> ActionResult<()> {
        self.authorize(who)?;
        if !self.uow.projects.delete(id).await? {
            return Err(ActionError::not_found("Project"));
        }
        info!(id = %id, "project deleted");
        Ok(())
    }

    /// Stores the cover at `covers/{slug}/cover.{ext}`, replacing any
    /// previous one.
    pub async fn upload_cover(
        &self,
        who: &AdminIdentity,
        id: ProjectId,
        file: UploadFile,
    ) -> ActionResult<Project> {
        self.authorize(who)?;
        let mut project = self.project(id).await?;
        let ext = extension(&file.file_name)
            .filter(|ext| is_image_extension(ext))
            .ok_or_else(|| ActionError::new("Cover must be an image"))?;
        let path = format!("covers/{}/cover.{ext}", project.slug);
        let options = UploadOptions {
            upsert: true,
            ..file.upload_options(&ext)
        };
        self.storage
            .upload(&self.buckets.site, &path, file.bytes, options)
            .await?;
        self.uow.projects.set_cover_path(id, &path).await?;
        project.cover_image_path = Some(path);
        Ok(project)
    }

    /// Images go under `gallery/{slug}/`, videos under `videos/{slug}/`. The
    /// first failed upload aborts the batch; objects already stored stay.
    pub async fn upload_gallery(
        &self,
        who: &AdminIdentity,
        id: ProjectId,
        files: Vec<UploadFile>,
    ) -> ActionResult<Project> {
        self.authorize(who)?;
        let mut project = self.project(id).await?;
        if files.is_empty() {
            return Err(ActionError::new("No files provided"));
        }

        let mut images = project.gallery_image_paths.clone();
        let mut videos = project.gallery_video_paths.clone();
        for file in files {
            let ext = extension(&file.file_name).unwrap_or_default();
            let (folder, target) = if is_image_extension(&ext) {
                ("gallery", &mut images)
            } else if is_video_extension(&ext) {
                ("videos", &mut videos)
            } else {
                return Err(ActionError::new(format!(
                    "Unsupported file type: {}",
                    file.file_name
                )));
            };
            let path = format!(
                "{folder}/{}/{}",
                project.slug,
                unique_storage_name(&file.file_name, &ext)
            );
            let options = file.upload_options(&ext);
            self.storage
                .upload(&self.buckets.site, &path, file.bytes, options)
                .await?;
            target.push(path);
        }

        images.sort();
        images.dedup();
        videos.sort();
        videos.dedup();
        self.uow
            .projects
            .set_gallery_paths(id, &images, &videos)
            .await?;
        project.gallery_image_paths = images;
        project.gallery_video_paths = videos;
        Ok(project)
    }

    // Portfolio galleries

    pub async fn list_galleries(
        &self,
        who: &AdminIdentity,
    ) -> ActionResult<Vec<PortfolioGallery>> {
        self.authorize(who)?;
        Ok(self.uow.galleries.list().await?)
    }

    pub async fn create_gallery(
        &self,
        who: &AdminIdentity,
        draft: GalleryDraft,
    ) -> ActionResult<PortfolioGallery> {
        self.authorize(who)?;
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ActionError::new("Name is required"));
        }
        let slug = match slugify(&draft.slug) {
            slug if slug.is_empty() => slugify(&name),
            slug => slug,
        };
        let order = match draft.order {
            Some(order) => order,
            None => self
                .uow
                .galleries
                .list()
                .await?
                .iter()
                .map(|g| g.order + 1)
                .max()
                .unwrap_or(0),
        };
        let gallery = PortfolioGallery {
            id: GalleryId::new(),
            name,
            slug,
            order,
            is_visible: draft.is_visible.unwrap_or(true),
            created_at: chrono::Utc::now(),
        };
        self.uow.galleries.insert(&gallery).await?;
        info!(id = %gallery.id, slug = %gallery.slug, "gallery created");
        Ok(gallery)
    }

    pub async fn update_gallery(
        &self,
        who: &AdminIdentity,
        id: GalleryId,
        draft: GalleryDraft,
    ) -> ActionResult<PortfolioGallery> {
        self.authorize(who)?;
        let mut gallery = self.gallery(id).await?;
        let name = draft.name.trim();
        if !name.is_empty() {
            gallery.name = name.to_string();
        }
        let slug = slugify(&draft.slug);
        if !slug.is_empty() {
            gallery.slug = slug;
        }
        if let Some(order) = draft.order {
            gallery.order = order;
        }
        if let Some(visible) = draft.is_visible {
            gallery.is_visible = visible;
        }
        self.uow.galleries.update(&gallery).await?;
        Ok(gallery)
    }

    /// Photos of the deleted gallery are kept, detached from any gallery.
    pub async fn delete_gallery(
        &self,
        who: &AdminIdentity,
        id: GalleryId,
    ) -> ActionResult<()> {
        self.authorize(who)?;
        if id.is_default() {
            return Err(ActionError::new("The default gallery cannot be deleted"));
        }
        self.gallery(id).await?;
        let detached = self.uow.photos.detach_gallery(id).await?;
        self.uow.galleries.delete(id).await?;
        info!(id = %id, detached, "gallery deleted");
        Ok(())
    }

    pub async fn list_photos(
        &self,
        who: &AdminIdentity,
        gallery: Option<GalleryId>,
    ) -> ActionResult<Vec<PortfolioPhoto>> {
        self.authorize(who)?;
        Ok(self.sync.admin_photos(gallery).await?)
    }

    /// Uploads the image files under `{gallery.slug}/` and appends a row for
    /// each. Returns how many rows were inserted.
    pub async fn upload_portfolio_photos(
        &self,
        who: &AdminIdentity,
        gallery_id: GalleryId,
        files: Vec<UploadFile>,
    ) -> ActionResult<usize> {
        self.authorize(who)?;
        let gallery = self.gallery(gallery_id).await?;
        let images: Vec<UploadFile> = files
            .into_iter()
            .filter(|f| is_gallery_image(&f.file_name))
            .collect();
        if images.is_empty() {
            return Err(ActionError::new("No images to upload"));
        }

        let bucket = self.sync.bucket().to_string();
        let mut next_order = self
            .uow
            .photos
            .max_order(gallery_id)
            .await?
            .map_or(0, |max| max + 1);
        let mut uploaded = 0;
        for file in images {
            let ext = extension(&file.file_name).unwrap_or_default();
            let path = format!(
                "{}/{}",
                gallery.slug,
                unique_storage_name(&file.file_name, &ext)
            );
            let options = file.upload_options(&ext);
            if let Err(err) = self
                .storage
                .upload(&bucket, &path, file.bytes, options)
                .await
            {
                warn!(path = %path, error = %err, "portfolio upload failed");
                continue;
            }
            let url = self.urls.public_object_url(&bucket, &path);
            match self
                .uow
                .photos
                .insert(NewPortfolioPhoto::visible(
                    gallery_id, &path, url, next_order,
                ))
                .await
            {
                Ok(_) => {
                    next_order += 1;
                    uploaded += 1;
                }
                Err(err) => {
                    warn!(path = %path, error = %err, "failed to record uploaded photo")
                }
            }
        }
        if uploaded == 0 {
            return Err(ActionError::new("No photos were uploaded"));
        }
        info!(gallery = %gallery_id, uploaded, "portfolio photos uploaded");
        Ok(uploaded)
    }

    pub async fn set_photo_visibility(
        &self,
        who: &AdminIdentity,
        id: PhotoId,
        visible: bool,
    ) -> ActionResult<()> {
        self.authorize(who)?;
        if !self.uow.photos.set_visibility(id, visible).await? {
            return Err(ActionError::not_found("Photo"));
        }
        Ok(())
    }

    /// Each photo's `order` becomes its position in `ids`.
    pub async fn reorder_photos(
        &self,
        who: &AdminIdentity,
        ids: &[PhotoId],
    ) -> ActionResult<()> {
        self.authorize(who)?;
        for (position, id) in ids.iter().enumerate() {
            let order = i32::try_from(position)
                .map_err(|_| ActionError::new("Too many photos to reorder"))?;
            if !self.uow.photos.set_order(*id, order).await? {
                return Err(ActionError::not_found("Photo"));
            }
        }
        Ok(())
    }

    /// Moves a photo to the end of another gallery.
    pub async fn move_photo(
        &self,
        who: &AdminIdentity,
        id: PhotoId,
        gallery: GalleryId,
    ) -> ActionResult<()> {
        self.authorize(who)?;
        self.gallery(gallery).await?;
        let order = self
            .uow
            .photos
            .max_order(gallery)
            .await?
            .map_or(0, |max| max + 1);
        if !self.uow.photos.move_to_gallery(id, gallery, order).await? {
            return Err(ActionError::not_found("Photo"));
        }
        Ok(())
    }

    /// Removes the row, then the stored object.
    pub async fn delete_photo(
        &self,
        who: &AdminIdentity,
        id: PhotoId,
    ) -> ActionResult<()> {
        self.authorize(who)?;
        let photo = self
            .uow
            .photos
            .delete(id)
            .await?
            .ok_or_else(|| ActionError::not_found("Photo"))?;
        if let Err(err) = self
            .storage
            .remove(self.sync.bucket(), &[photo.storage_path.clone()])
            .await
        {
            warn!(path = %photo.storage_path, error = %err, "photo row deleted but object removal failed");
        }
        Ok(())
    }

    pub async fn sync_gallery(
        &self,
        who: &AdminIdentity,
        id: GalleryId,
    ) -> ActionResult<SyncReport> {
        self.authorize(who)?;
        let gallery = self.gallery(id).await?;
        Ok(self.sync.sync_gallery(id, &gallery.slug).await?)
    }

    // Pages

    pub async fn save_page(
        &self,
        who: &AdminIdentity,
        slug: &str,
        locale: Locale,
        title: &str,
        content: &str,
    ) -> ActionResult<Page> {
        self.authorize(who)?;
        let slug = slugify(slug);
        if slug.is_empty() {
            return Err(ActionError::new("Slug is required"));
        }
        let page = Page {
            slug,
            locale,
            title: title.trim().to_string(),
            content: content.to_string(),
        };
        self.uow.pages.upsert(&page).await?;
        Ok(page)
    }

    // Videos

    pub async fn hidden_video_ids(
        &self,
        who: &AdminIdentity,
    ) -> ActionResult<Vec<String>> {
        self.authorize(who)?;
        let mut ids: Vec<String> = self.videos.hidden_ids().await.into_iter().collect();
        ids.sort();
        Ok(ids)
    }

    pub async fn custom_video_ids(
        &self,
        who: &AdminIdentity,
    ) -> ActionResult<Vec<String>> {
        self.authorize(who)?;
        let mut ids: Vec<String> = self.videos.custom_ids().await.into_iter().collect();
        ids.sort();
        Ok(ids)
    }

    pub async fn hide_video(
        &self,
        who: &AdminIdentity,
        id: &str,
    ) -> ActionResult<String> {
        self.authorize(who)?;
        Ok(self.videos.hide(id).await?)
    }

    pub async fn unhide_video(
        &self,
        who: &AdminIdentity,
        id: &str,
    ) -> ActionResult<String> {
        self.authorize(who)?;
        Ok(self.videos.unhide(id).await?)
    }

    pub async fn add_custom_video(
        &self,
        who: &AdminIdentity,
        id: &str,
    ) -> ActionResult<String> {
        self.authorize(who)?;
        Ok(self.videos.add_custom(id).await?)
    }

    pub async fn remove_custom_video(
        &self,
        who: &AdminIdentity,
        id: &str,
    ) -> ActionResult<String> {
        self.authorize(who)?;
        Ok(self.videos.remove_custom(id).await?)
    }

    // Contact

    pub async fn contact_submissions(
        &self,
        who: &AdminIdentity,
        limit: i64,
    ) -> ActionResult<Vec<ContactSubmission>> {
        self.authorize(who)?;
        Ok(self.uow.contact.list_recent(limit.clamp(1, 500)).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::storage::{InMemoryObjectStorage, UrlCache};
    use crate::video::{VideoSource, VimeoClient};

    const BASE: &str = "https://demo.supabase.co";

    fn admin() -> AdminIdentity {
        AdminIdentity {
            email: "Ana@Example.com".into(),
        }
    }

    fn intruder() -> AdminIdentity {
        AdminIdentity {
            email: "someone@else.com".into(),
        }
    }

    fn fixture() -> (Arc<InMemoryObjectStorage>, AppUnitOfWork, AdminActions) {
        let uow = AppUnitOfWork::in_memory();
        let storage = Arc::new(InMemoryObjectStorage::new(BASE));
        let urls = StorageUrls::new(Some(BASE), UrlCache::default());
        let buckets = Buckets::default();
        let sync = PortfolioSync::new(
            storage.clone(),
            uow.photos.clone(),
            urls.clone(),
            buckets.projects.clone(),
        );
        let source: Arc<dyn VideoSource> = Arc::new(
            VimeoClient::new(None, Duration::from_secs(1)).expect("client"),
        );
        let videos = VideoLibrary::new(source, uow.video_ids.clone());
        let actions = AdminActions::new(
            uow.clone(),
            storage.clone(),
            urls,
            buckets,
            sync,
            videos,
            AdminAllowlist::from_csv("ana@example.com"),
        );
        (storage, uow, actions)
    }

    fn draft(title: &str, slug: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.into(),
            slug: slug.into(),
            tags: vec!["music video, live".into()],
            summary: Some("  ".into()),
            published: true,
            ..ProjectDraft::default()
        }
    }

    #[tokio::test]
    async fn every_action_rejects_unlisted_emails() {
        let (_, _, actions) = fixture();
        let who = intruder();
        let id = ProjectId::new();
        let gallery = GalleryId::DEFAULT;
        let photo = PhotoId::new();

        let results = vec![
            actions.list_projects(&who).await.err(),
            actions.get_project(&who, id).await.err(),
            actions.create_project(&who, draft("A", "a")).await.err(),
            actions.update_project(&who, id, draft("A", "a")).await.err(),
            actions.publish_project(&who, id, true).await.err(),
            actions.delete_project(&who, id).await.err(),
            actions.upload_cover(&who, id, UploadFile::new("c.jpg", "x")).await.err(),
            actions.upload_gallery(&who, id, vec![]).await.err(),
            actions.list_galleries(&who).await.err(),
            actions.create_gallery(&who, GalleryDraft::default()).await.err(),
            actions.update_gallery(&who, gallery, GalleryDraft::default()).await.err(),
            actions.delete_gallery(&who, gallery).await.err(),
            actions.list_photos(&who, None).await.err(),
            actions.upload_portfolio_photos(&who, gallery, vec![]).await.err(),
            actions.set_photo_visibility(&who, photo, false).await.err(),
            actions.reorder_photos(&who, &[photo]).await.err(),
            actions.move_photo(&who, photo, gallery).await.err(),
            actions.delete_photo(&who, photo).await.err(),
            actions.sync_gallery(&who, gallery).await.err(),
            actions.save_page(&who, "about", Locale::Es, "t", "c").await.err(),
            actions.hidden_video_ids(&who).await.err(),
            actions.custom_video_ids(&who).await.err(),
            actions.hide_video(&who, "1").await.err(),
            actions.unhide_video(&who, "1").await.err(),
            actions.add_custom_video(&who, "1").await.err(),
            actions.remove_custom_video(&who, "1").await.err(),
            actions.contact_submissions(&who, 10).await.err(),
        ];
        for err in results {
            assert_eq!(err, Some(ActionError::forbidden()));
        }
    }

    #[tokio::test]
    async fn created_projects_are_normalized_and_unpublished() {
        let (_, _, actions) = fixture();
        let project = actions
            .create_project(&admin(), draft(" Night Drive ", "Night Drive"))
            .await
            .expect("create");
        assert_eq!(project.slug, "night-drive");
        assert_eq!(project.title, "Night Drive");
        assert_eq!(project.summary, None);
        assert_eq!(project.tags, vec!["music video", "live"]);
        assert!(!project.published);

        let err = actions
            .create_project(&admin(), draft("  ", "x"))
            .await
            .expect_err("blank title");
        assert_eq!(err.error, "Title and slug are required");
    }

    #[tokio::test]
    async fn update_keeps_uploads_and_takes_published_from_form() {
        let (_, uow, actions) = fixture();
        let project = actions
            .create_project(&admin(), draft("A", "a"))
            .await
            .expect("create");
        uow.projects
            .set_cover_path(project.id, "covers/a/cover.jpg")
            .await
            .expect("cover");

        let updated = actions
            .update_project(&admin(), project.id, draft("B", "b"))
            .await
            .expect("update");
        assert_eq!(updated.slug, "b");
        assert!(updated.published);
        assert_eq!(updated.cover_image_path.as_deref(), Some("covers/a/cover.jpg"));
    }

    #[tokio::test]
    async fn cover_upload_replaces_fixed_key() {
        let (storage, _, actions) = fixture();
        let project = actions
            .create_project(&admin(), draft("A", "reel"))
            .await
            .expect("create");
        for _ in 0..2 {
            let updated = actions
                .upload_cover(&admin(), project.id, UploadFile::new("IMG.PNG", "png"))
                .await
                .expect("cover upload");
            assert_eq!(updated.cover_image_path.as_deref(), Some("covers/reel/cover.png"));
        }
        assert!(storage.contains("public", "covers/reel/cover.png").await);

        let err = actions
            .upload_cover(&admin(), project.id, UploadFile::new("clip.mp4", "v"))
            .await
            .expect_err("video cover");
        assert_eq!(err.error, "Cover must be an image");
    }

    #[tokio::test]
    async fn gallery_upload_splits_images_and_videos() {
        let (storage, uow, actions) = fixture();
        let project = actions
            .create_project(&admin(), draft("A", "reel"))
            .await
            .expect("create");
        let updated = actions
            .upload_gallery(
                &admin(),
                project.id,
                vec![
                    UploadFile::new("b.jpg", "1"),
                    UploadFile::new("a.webp", "2"),
                    UploadFile::new("take.mov", "3"),
                ],
            )
            .await
            .expect("gallery upload");

        assert_eq!(updated.gallery_image_paths.len(), 2);
        assert!(updated.gallery_image_paths[0].starts_with("gallery/reel/a-"));
        assert!(updated.gallery_image_paths[1].starts_with("gallery/reel/b-"));
        assert_eq!(updated.gallery_video_paths.len(), 1);
        assert!(updated.gallery_video_paths[0].starts_with("videos/reel/take-"));
        assert_eq!(storage.keys("public").await.len(), 3);

        let stored = uow.projects.get(project.id).await.unwrap().unwrap();
        assert_eq!(stored.gallery_image_paths, updated.gallery_image_paths);

        let err = actions
            .upload_gallery(&admin(), project.id, vec![UploadFile::new("notes.txt", "x")])
            .await
            .expect_err("unsupported");
        assert!(err.error.starts_with("Unsupported file type"));
    }

    #[tokio::test]
    async fn portfolio_uploads_append_after_existing_photos() {
        let (storage, _, actions) = fixture();
        storage.put("projects", "portfolio/old.jpg", "x").await;
        actions
            .sync_gallery(&admin(), GalleryId::DEFAULT)
            .await
            .expect("sync");

        let uploaded = actions
            .upload_portfolio_photos(
                &admin(),
                GalleryId::DEFAULT,
                vec![
                    UploadFile::new("new.png", "1"),
                    UploadFile::new("readme.md", "2"),
                ],
            )
            .await
            .expect("upload");
        assert_eq!(uploaded, 1);

        let photos = actions
            .list_photos(&admin(), Some(GalleryId::DEFAULT))
            .await
            .expect("photos");
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].storage_path, "portfolio/old.jpg");
        assert!(photos[1].storage_path.starts_with("portfolio/new-"));
        assert_eq!(photos[1].order, 1);

        let err = actions
            .upload_portfolio_photos(
                &admin(),
                GalleryId::DEFAULT,
                vec![UploadFile::new("readme.md", "2")],
            )
            .await
            .expect_err("no images");
        assert_eq!(err.error, "No images to upload");
    }

    #[tokio::test]
    async fn photo_curation() {
        let (storage, _, actions) = fixture();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            storage.put("projects", &format!("portfolio/{name}"), "x").await;
        }
        let who = admin();
        actions.sync_gallery(&who, GalleryId::DEFAULT).await.expect("sync");
        let photos = actions.list_photos(&who, None).await.expect("photos");
        let ids: Vec<PhotoId> = photos.iter().rev().map(|p| p.id).collect();

        actions.reorder_photos(&who, &ids).await.expect("reorder");
        actions
            .set_photo_visibility(&who, ids[0], false)
            .await
            .expect("hide");
        let reordered = actions.list_photos(&who, None).await.expect("photos");
        assert_eq!(reordered[0].storage_path, "portfolio/c.jpg");
        assert!(!reordered[0].is_visible);

        let extra = actions
            .create_gallery(
                &who,
                GalleryDraft {
                    name: "Retratos".into(),
                    ..GalleryDraft::default()
                },
            )
            .await
            .expect("gallery");
        assert_eq!(extra.slug, "retratos");
        assert_eq!(extra.order, 1);

        actions.move_photo(&who, ids[1], extra.id).await.expect("move");
        let moved = actions
            .list_photos(&who, Some(extra.id))
            .await
            .expect("photos");
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].order, 0);

        actions.delete_photo(&who, ids[2]).await.expect("delete");
        assert!(!storage.contains("projects", "portfolio/a.jpg").await);

        actions.delete_gallery(&who, extra.id).await.expect("delete gallery");
        let detached = actions.list_photos(&who, None).await.expect("photos");
        assert_eq!(detached.len(), 2);
        assert!(detached.iter().any(|p| p.gallery_id.is_none()));

        let err = actions
            .delete_gallery(&who, GalleryId::DEFAULT)
            .await
            .expect_err("default gallery");
        assert_eq!(err.error, "The default gallery cannot be deleted");
    }

    #[tokio::test]
    async fn moved_photo_is_not_synced_back_into_default_gallery() {
        let (storage, _, actions) = fixture();
        storage.put("projects", "portfolio/a.jpg", "x").await;
        let who = admin();
        let before = actions.list_photos(&who, None).await.expect("photos");
        assert_eq!(before.len(), 1);

        let retratos = actions
            .create_gallery(
                &who,
                GalleryDraft {
                    name: "Retratos".into(),
                    ..GalleryDraft::default()
                },
            )
            .await
            .expect("gallery");
        actions
            .move_photo(&who, before[0].id, retratos.id)
            .await
            .expect("move");

        let after = actions.list_photos(&who, None).await.expect("photos");
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].gallery_id, Some(retratos.id));
        let report = actions
            .sync_gallery(&who, GalleryId::DEFAULT)
            .await
            .expect("sync");
        assert_eq!(report.inserted, 0);
        assert_eq!(report.already_known, 1);

        actions.delete_gallery(&who, retratos.id).await.expect("delete");
        let detached = actions.list_photos(&who, None).await.expect("photos");
        assert_eq!(detached.len(), 1);
        assert_eq!(detached[0].gallery_id, None);
    }

    #[tokio::test]
    async fn pages_and_video_ids() {
        let (_, uow, actions) = fixture();
        let who = admin();
        actions
            .save_page(&who, "About", Locale::En, " About ", "<p>hi</p>")
            .await
            .expect("save");
        let page = uow.pages.get("about", Locale::En).await.unwrap().unwrap();
        assert_eq!(page.title, "About");

        assert_eq!(
            actions.hide_video(&who, "vimeo.com/123").await.expect("hide"),
            "123"
        );
        actions.add_custom_video(&who, "456").await.expect("pin");
        assert_eq!(actions.hidden_video_ids(&who).await.unwrap(), vec!["123"]);
        assert_eq!(actions.custom_video_ids(&who).await.unwrap(), vec!["456"]);
        actions.unhide_video(&who, "123").await.expect("unhide");
        assert!(actions.hidden_video_ids(&who).await.unwrap().is_empty());
    }
}

use tiered_acl::*;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut acl: Acl<&str, &str, &str> = Acl::new();

    acl.try_add_role("guest", None)?;
    acl.try_add_role("staff", Some("guest"))?;
    acl.try_add_role("editor", Some("staff"))?;
    acl.try_add_role("admin", None)?;

    // guest may only view content
    acl.allow(Some("guest"), None, Some("view"));

    // staff inherits view privilege from guest, but also needs additional privileges
    acl.allow(Some("staff"), None, vec!["edit", "submit", "revise"]);

    // editor inherits view, edit, submit, and revise privileges from staff, but also needs
    // additional privileges
    acl.allow(Some("editor"), None, vec!["publish", "archive", "delete"]);

    // admin inherits nothing, but is allowed all privileges
    acl.allow(Some("admin"), None, None);

    // marketing inherits from staff
    acl.try_add_role("marketing", Some("staff"))?;

    acl.try_add_resource("newsletter", None)?;
    acl.try_add_resource("news", None)?;
    acl.try_add_resource("latest", Some("news"))?;
    acl.try_add_resource("announcement", Some("news"))?;

    // marketing must be able to publish and archive newsletters and the latest news
    acl.allow(Some("marketing"), vec!["newsletter", "latest"], vec!["publish", "archive"]);

    // staff (and marketing, by inheritance), are denied permission to revise the latest news
    acl.deny(Some("staff"), Some("latest"), Some("revise"));

    // no role is allowed to archive announcements, unless a rule of its own says so
    acl.deny(None, Some("announcement"), Some("archive"));

    let queries = [
        ("staff",     "newsletter",   "publish"),
        ("marketing", "newsletter",   "publish"),
        ("marketing", "latest",       "revise"),
        ("editor",    "latest",       "view"),
        ("staff",     "announcement", "archive"),
        ("admin",     "announcement", "archive"),
    ];

    for (role, resource, privilege) in queries.iter() {
        let access = acl.resolve(Some(*role), Some(*resource), Some(*privilege));

        println!("{:<10} {:<13} {:<8} {:?}", role, resource, privilege, access);
    } // for

    Ok(())
} // main

//! Built-in message catalogues, keyed by dotted path.

pub const EN: &[(&str, &str)] = &[
    ("general.hangar", "Hangar"),
    ("general.tagline", "Plugin repository for Paper plugins and more!"),
    ("general.loading", "Loading..."),
    ("general.statusz", "Status"),
    ("general.cancel", "Cancel"),
    ("general.save", "Save"),
    ("general.error", "Something went wrong"),
    ("nav.home", "Home"),
    ("nav.login", "Login"),
    ("nav.signup", "Sign up"),
    ("nav.logout", "Log out"),
    ("nav.authors", "Authors"),
    ("nav.staff", "Staff"),
    ("nav.user.settings", "Settings"),
    ("nav.user.notifications", "Notifications"),
    ("nav.user.projects", "Projects"),
    ("project.create", "Create project"),
    ("project.stars", "Stars"),
    ("project.watchers", "Watchers"),
    ("project.downloads", "Downloads"),
    ("project.versions", "Versions"),
    ("error.404", "Page not found"),
    ("error.unknown", "An unknown error occurred"),
    ("footer.api", "API"),
    ("footer.privacy", "Privacy policy"),
];

pub const FR: &[(&str, &str)] = &[
    ("general.tagline", "Dépôt de plugins pour Paper et plus encore !"),
    ("general.loading", "Chargement..."),
    ("general.cancel", "Annuler"),
    ("general.save", "Enregistrer"),
    ("general.error", "Une erreur est survenue"),
    ("nav.home", "Accueil"),
    ("nav.login", "Connexion"),
    ("nav.signup", "Inscription"),
    ("nav.logout", "Déconnexion"),
    ("nav.authors", "Auteurs"),
    ("nav.staff", "Équipe"),
    ("nav.user.settings", "Paramètres"),
    ("nav.user.notifications", "Notifications"),
    ("nav.user.projects", "Projets"),
    ("project.create", "Créer un projet"),
    ("project.stars", "Étoiles"),
    ("project.downloads", "Téléchargements"),
    ("error.404", "Page introuvable"),
    ("footer.privacy", "Politique de confidentialité"),
];
